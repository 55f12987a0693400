//! Configuration loading and management

mod io;

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Main configuration structure (`~/.ril/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// JSON challenge file to load at startup
    #[serde(default)]
    pub collection_path: Option<PathBuf>,

    /// Progress storage settings
    #[serde(default)]
    pub storage: StorageSettings,

    /// Practice timer settings
    #[serde(default)]
    pub timer: TimerSettings,
}

/// Where progress is persisted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory holding one file per storage key.
    /// Defaults to `~/.ril/storage` when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl StorageSettings {
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| Config::global_config_dir().join("storage"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Milliseconds between ticks; each tick adds one second
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

fn default_tick_interval_ms() -> u64 {
    1000
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl TimerSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
