//! Store configuration
//!
//! Read from ~/.config/dmap/config.json when present, otherwise defaults.

use crate::trie::MAX_LEVEL_CAPACITY;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tunables for a [`DoubleMap`](crate::DoubleMap)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Maximum number of entries in one trie level
    pub level_capacity: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            level_capacity: MAX_LEVEL_CAPACITY,
        }
    }
}

impl MapConfig {
    /// Config with a specific level capacity
    pub fn with_level_capacity(level_capacity: usize) -> Result<Self> {
        let config = MapConfig { level_capacity };
        config.validate()?;
        Ok(config)
    }

    /// Check that values are within range
    pub fn validate(&self) -> Result<()> {
        if self.level_capacity == 0 || self.level_capacity > MAX_LEVEL_CAPACITY {
            return Err(Error::Config(format!(
                "level_capacity must be between 1 and {}, got {}",
                MAX_LEVEL_CAPACITY, self.level_capacity
            )));
        }
        Ok(())
    }

    /// Default config file location (~/.config/dmap/config.json)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dmap").join("config.json"))
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        let config: MapConfig = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, else from the default location if it exists
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }
}
