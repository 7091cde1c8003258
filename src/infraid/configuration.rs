// Copyright (c) 2025, TheByteSlayer, InfraID
// Stable infrastructure identifiers for provisioned clusters, written in Rust.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

pub const INSTALL_CONFIG_FILE: &str = "install-config.toml";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Metadata {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct InstallConfig {
    pub metadata: Metadata,
}

impl InstallConfig {
    pub fn new(name: &str) -> Self {
        Self {
            metadata: Metadata {
                name: name.to_string(),
            },
        }
    }

    pub fn cluster_name(&self) -> &str {
        &self.metadata.name
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config = match toml::from_str::<InstallConfig>(&content) {
            Ok(config) => config,
            Err(e) => {
                debug!("Falling back to partial parse of {}: {}", path.display(), e);
                Self::parse_partial_config(&content)?
            }
        };

        if config.metadata.name.trim().is_empty() {
            return Err(ConfigError::MissingClusterName);
        }

        Ok(config)
    }

    fn parse_partial_config(content: &str) -> ConfigResult<Self> {
        let toml_value: toml::Value = toml::from_str(content)?;

        let mut config = Self::default();

        if let toml::Value::Table(table) = toml_value {
            if let Some(toml::Value::Table(metadata)) = table.get("metadata") {
                if let Some(toml::Value::String(name)) = metadata.get("name") {
                    config.metadata.name = name.clone();
                }
            }
        }

        Ok(config)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
