//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::{APP_DIR_NAME, MAX_TITLE_LEN};
use crate::services::CategoryPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Storage locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory holding `activities.json` and `images/`.
    /// Defaults to the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Sorting board rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingConfig {
    /// Categories that must remain; deleting below this is refused.
    #[serde(default = "default_min_categories")]
    pub min_categories: usize,
    /// Maximum activity title length accepted by the input layer.
    #[serde(default = "default_max_title_len")]
    pub max_title_len: usize,
}

const fn default_min_categories() -> usize {
    1
}

const fn default_max_title_len() -> usize {
    MAX_TITLE_LEN
}

impl Default for SortingConfig {
    fn default() -> Self {
        Self {
            min_categories: default_min_categories(),
            max_title_len: default_max_title_len(),
        }
    }
}

impl SortingConfig {
    /// The category policy described by this configuration.
    #[must_use]
    pub const fn category_policy(&self) -> CategoryPolicy {
        CategoryPolicy::new(self.min_categories)
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/SortBoard/config.toml`
/// - macOS: `~/Library/Application Support/SortBoard/config.toml`
/// - Windows: `%APPDATA%\SortBoard\config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Storage locations
    #[serde(default)]
    pub storage: StorageConfig,
    /// Sorting rules
    #[serde(default)]
    pub sorting: SortingConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from `path`, falling back to defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to `path` using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = path.with_extension("toml.tmp");
        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp config file: {}", temp_path.display())
        })?;

        fs::rename(&temp_path, path).with_context(|| {
            format!("Failed to rename temp config file to: {}", path.display())
        })?;

        Ok(())
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.sorting.max_title_len == 0 {
            anyhow::bail!("sorting.max_title_len must be at least 1");
        }

        if let Some(data_dir) = &self.storage.data_dir {
            if data_dir.exists() && !data_dir.is_dir() {
                anyhow::bail!(
                    "storage.data_dir is not a directory: {}",
                    data_dir.display()
                );
            }
        }

        Ok(())
    }

    /// Resolves the data directory: explicit setting, else the platform data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.storage.data_dir {
            return Ok(dir.clone());
        }

        let dir = dirs::data_dir()
            .context("Failed to determine data directory")?
            .join(APP_DIR_NAME);
        Ok(dir)
    }
}
