//! Configuration for dropsize.
//!
//! The config file is JSON and every field is optional; anything left out
//! falls back to the default sizing table.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::sizing::{PolicyError, SizingPolicy};

/// File name looked up by [`Config::discover`].
pub const CONFIG_FILE_NAME: &str = ".dropsize.json";

/// Main configuration for dropsize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sizing policy table.
    pub policy: SizingPolicy,
}

impl Config {
    /// Load and validate configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.policy.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Load `dir/.dropsize.json` if it exists, otherwise the default config.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Config parsed but the policy is inconsistent.
    #[error("Invalid sizing policy: {0}")]
    Invalid(#[from] PolicyError),
}
