//! Console configuration.
//!
//! Loaded from TOML; every section and field is optional and falls back to
//! the defaults below.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::role::Role;

const DEFAULT_MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const DEFAULT_MAX_LOG_FILES: usize = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl ConsoleConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// trace|debug|info|warn|error
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Absolute directory for rolling log files. Logs go to stderr when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,
    #[serde(default = "default_max_files")]
    pub max_files: usize,
    /// Also echo info and above to stderr when logging to files.
    #[serde(default)]
    pub duplicate_to_stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
            max_file_size_bytes: DEFAULT_MAX_LOG_FILE_SIZE_BYTES,
            max_files: DEFAULT_MAX_LOG_FILES,
            duplicate_to_stderr: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Role used when the login selection is left blank.
    #[serde(default)]
    pub default_role: Role,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Simulated backend latency for the async search path.
    #[serde(default)]
    pub latency_ms: u64,
}

impl SearchConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Default level for the current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> String {
    if cfg!(debug_assertions) {
        "debug".to_string()
    } else {
        "info".to_string()
    }
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_LOG_FILE_SIZE_BYTES
}

fn default_max_files() -> usize {
    DEFAULT_MAX_LOG_FILES
}
