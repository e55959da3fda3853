//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Command-line flags override whatever is loaded here.

use std::env;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Default upload limit: 5 MiB.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// How a validation result is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed `ImportValidationResult` JSON
    Json,
    /// Human-readable summary
    Text,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            _ => Err(ConfigError::InvalidValue("MENU_IMPORT_FORMAT".to_string())),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Files larger than this are rejected before being read
    pub max_file_bytes: u64,

    /// Output format for `validate`
    pub format: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            format: OutputFormat::Json,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CliConfig::default();

        let max_file_bytes = match lookup("MENU_IMPORT_MAX_FILE_BYTES") {
            Some(raw) => raw
                .trim()
                .parse()
                .ok()
                .filter(|bytes: &u64| *bytes > 0)
                .ok_or_else(|| ConfigError::InvalidValue("MENU_IMPORT_MAX_FILE_BYTES".to_string()))?,
            None => defaults.max_file_bytes,
        };

        let format = match lookup("MENU_IMPORT_FORMAT") {
            Some(raw) => raw.parse()?,
            None => defaults.format,
        };

        Ok(CliConfig {
            max_file_bytes,
            format,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
