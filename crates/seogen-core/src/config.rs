//! Configuration management for SEOGEN.
//!
//! Loads configuration from ${SEOGEN_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// API endpoint configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the SEOGEN API. Overridden by `SEOGEN_BASE_URL`.
    pub base_url: Option<String>,
}

/// Notification rendering configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Collapse repeated identical messages within one invocation.
    pub dedup: bool,
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API endpoint configuration.
    pub api: ApiConfig,

    /// Notification rendering configuration.
    pub notifications: NotificationsConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }
}

pub mod paths {
    //! Path resolution for SEOGEN configuration and data files.
    //!
    //! SEOGEN_HOME resolution order:
    //! 1. SEOGEN_HOME environment variable (if set)
    //! 2. ~/.config/seogen (default)

    use std::path::PathBuf;

    /// Returns the SEOGEN home directory.
    ///
    /// Checks SEOGEN_HOME env var first, falls back to ~/.config/seogen
    pub fn seogen_home() -> PathBuf {
        if let Ok(home) = std::env::var("SEOGEN_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("seogen"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        seogen_home().join("config.toml")
    }

    /// Returns the path to the credential file.
    pub fn credential_path() -> PathBuf {
        seogen_home().join("credential.json")
    }
}
