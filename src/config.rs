//! Configuration file handling for the `rate-gap` binary
//!
//! Looked up at the `--config` path if given, else `~/.rate-gap/config.toml`.
//! Any missing field falls back to its default.
//!
//! ```toml
//! data_dir = "/home/me/.rate-gap"
//! api_url = "https://api.frankfurter.dev/v1/latest?base=USD&symbols=KRW"
//! timeout_secs = 30
//! storage = "sqlite"
//! ```

use crate::error::{RateGapError, Result};
use crate::storage::{FileStore, KeyValueStore};
use crate::types::DEFAULT_RATE_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which key-value store backs the history log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Sqlite,
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub storage: StorageBackend,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rate-gap")
}

fn default_api_url() -> String {
    DEFAULT_RATE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            storage: StorageBackend::default(),
        }
    }
}

impl Config {
    /// Parse a TOML document
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| RateGapError::ConfigError(e.to_string()))
    }

    /// Read a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load from `path`, or the default location, or fall back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let candidate = match path {
            Some(p) => Some(p.to_path_buf()),
            None => dirs::home_dir().map(|home| home.join(".rate-gap").join("config.toml")),
        };

        match candidate {
            Some(p) if p.exists() => match Self::from_file(&p) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Failed to load config {}: {}", p.display(), e);
                    Config::default()
                }
            },
            _ => Config::default(),
        }
    }

    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Open the configured history store
    pub fn open_store(&self) -> Result<Box<dyn KeyValueStore>> {
        match self.storage {
            StorageBackend::File => Ok(Box::new(FileStore::open(&self.data_dir)?)),
            #[cfg(feature = "rusqlite-support")]
            StorageBackend::Sqlite => Ok(Box::new(crate::storage::SqliteStore::open(
                self.data_dir.join("history.db"),
            )?)),
            #[cfg(not(feature = "rusqlite-support"))]
            StorageBackend::Sqlite => Err(RateGapError::ConfigError(
                "sqlite storage requires the rusqlite-support feature".to_string(),
            )),
        }
    }
}
