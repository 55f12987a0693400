//! Configuration file I/O operations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::Config;
use crate::progress::FileStorage;

impl Config {
    /// Get the global config directory path (~/.ril/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ril")
    }

    /// Get the global config file path (~/.ril/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load global configuration from ~/.ril/config.toml.
    /// A missing file yields the defaults; nothing is written.
    pub fn load() -> Result<Self> {
        let path = Self::global_config_path();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// File-backed progress storage at the configured directory
    pub fn open_storage(&self) -> FileStorage {
        FileStorage::new(self.storage.resolved_dir())
    }
}
