// Copyright (c) 2025, TheByteSlayer, InfraID
// Stable infrastructure identifiers for provisioned clusters, written in Rust.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::InfraIdResult;
use crate::normalize::normalize;

pub const INFRA_ID_KEY: &str = "INFRA_ID";
pub const INFRA_ID_SUFFIX_KEY: &str = "INFRA_ID_SUFFIX";

/// Raw result of looking a key up in the environment snapshot and the
/// dot-file directory.
#[derive(Debug)]
pub enum Lookup {
    Found(String),
    NotFound,
    ReadError { path: PathBuf, source: io::Error },
}

/// Override values for identifier generation.
///
/// Holds a snapshot of the environment plus the directory searched for
/// dot-files. Values written back during generation land in the snapshot,
/// so later lookups on the same `Overrides` see them as explicit overrides.
#[derive(Debug, Clone)]
pub struct Overrides {
    env: HashMap<String, String>,
    dir: PathBuf,
    exported: BTreeMap<String, String>,
}

impl Overrides {
    /// Empty environment, dot-files read from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            env: HashMap::new(),
            dir: dir.into(),
            exported: BTreeMap::new(),
        }
    }

    /// Snapshot of the override keys in the process environment.
    pub fn from_process(dir: impl Into<PathBuf>) -> Self {
        let mut overrides = Self::new(dir);
        for key in [INFRA_ID_KEY, INFRA_ID_SUFFIX_KEY] {
            if let Ok(value) = std::env::var(key) {
                overrides.env.insert(key.to_string(), value);
            }
        }
        overrides
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn env(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    /// Stores `value` under `key` and records it for export.
    pub fn write_back(&mut self, key: &str, value: &str) {
        debug!("Writing back {}={}", key, value);
        self.env.insert(key.to_string(), value.to_string());
        self.exported.insert(key.to_string(), value.to_string());
    }

    /// Values written back so far, sorted by key.
    pub fn exported(&self) -> &BTreeMap<String, String> {
        &self.exported
    }

    pub fn dot_file_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{}", key.to_lowercase()))
    }

    /// Reads `key` from the environment snapshot, falling back to its
    /// dot-file when the variable is unset or empty.
    ///
    /// Dot-file contents are used whole except for one trailing `\n` or
    /// `\r\n`, so a file written by `echo false` disables the override.
    pub fn lookup_raw(&self, key: &str) -> Lookup {
        if let Some(value) = self.env(key).filter(|value| !value.is_empty()) {
            return Lookup::Found(value.to_string());
        }

        let path = self.dot_file_path(key);
        if !path.exists() {
            return Lookup::NotFound;
        }

        match fs::read_to_string(&path) {
            Ok(content) => {
                let content = content
                    .strip_suffix('\n')
                    .map(|line| line.strip_suffix('\r').unwrap_or(line))
                    .unwrap_or(content.as_str());
                Lookup::Found(content.to_string())
            }
            Err(source) => Lookup::ReadError { path, source },
        }
    }

    /// Resolves `key` to a normalized override value.
    ///
    /// Empty values and `false` mean no override, `.` stands for the base
    /// name of the override directory (resolved to an absolute path first).
    /// Dot-file values lose one trailing line terminator before these
    /// checks. Dot-file read errors are logged and treated as no override.
    pub fn lookup(&self, key: &str) -> InfraIdResult<Option<String>> {
        let value = match self.lookup_raw(key) {
            Lookup::Found(value) => value,
            Lookup::NotFound => return Ok(None),
            Lookup::ReadError { path, source } => {
                warn!("Ignoring unreadable override file {}: {}", path.display(), source);
                return Ok(None);
            }
        };

        if value.is_empty() || value.eq_ignore_ascii_case("false") {
            return Ok(None);
        }

        let value = if value == "." {
            self.dir_base_name()
        } else {
            value
        };

        normalize(&value).map(Some)
    }

    fn dir_base_name(&self) -> String {
        // `.` and `..` have no file name until resolved
        let dir = fs::canonicalize(&self.dir)
            .or_else(|_| std::path::absolute(&self.dir))
            .unwrap_or_else(|_| self.dir.clone());
        dir.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
