// Copyright (c) 2025, TheByteSlayer, InfraID
// Stable infrastructure identifiers for provisioned clusters, written in Rust.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraIdError {
    #[error("Invalid input string \"{0}\": it must contain at least 1 alphanumeric character")]
    InvalidInput(String),
    #[error("Maximum length {0} leaves no room for the cluster name (minimum is {1})")]
    MaxLengthTooShort(usize, usize),
}

pub type InfraIdResult<T> = Result<T, InfraIdError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
    #[error("Install config has no cluster name (metadata.name)")]
    MissingClusterName,
    #[error(transparent)]
    InfraId(#[from] InfraIdError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
