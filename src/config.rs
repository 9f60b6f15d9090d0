//! Configuration module for photocat
//!
//! Manages import and grouping defaults. Configuration is stored as TOML in
//! the user's config directory and can be overridden per run through
//! `PHOTOCAT_*` environment variables (e.g. `PHOTOCAT_BATCH_SIZE=50`,
//! `PHOTOCAT_EXTENSIONS=jpg,png`).

use crate::catalog::DEFAULT_BATCH_SIZE;
use crate::classify::{Classifier, GroupMode};
use crate::metadata::DEFAULT_PARTIAL_READ;
use crate::source::{DEFAULT_EXTENSIONS, LocalFileSource, ScanLayout};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "PHOTOCAT";

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Files normalized per import batch
    pub batch_size: usize,

    /// Leading bytes read from each file for metadata
    pub partial_read_bytes: usize,

    /// Image extensions picked up by the scanner (lower-case, no dot)
    pub extensions: Vec<String>,

    /// Group mode used when none is given on the command line
    pub default_mode: GroupMode,

    /// Group by immediate directory instead of import root
    pub nested_folders: bool,

    /// Remark stop words added to the built-in set
    pub stop_words: Vec<String>,

    /// Suppress informational output by default
    pub quiet: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            partial_read_bytes: DEFAULT_PARTIAL_READ,
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            default_mode: GroupMode::default(),
            nested_folders: false,
            stop_words: Vec::new(),
            quiet: false,
        }
    }
}

impl CatalogConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("photocat").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it is missing
    ///
    /// Environment overrides are applied on top of the file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("Writing default configuration to {}", path.display());
            Self::default().save_to(path)?;
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("extensions")
                    .with_list_parse_key("stop_words"),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string).map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Message("batch_size must be at least 1".to_string()));
        }
        if self.partial_read_bytes == 0 {
            return Err(ConfigError::Message("partial_read_bytes must be at least 1".to_string()));
        }
        Ok(())
    }

    #[must_use]
    pub const fn scan_layout(&self) -> ScanLayout {
        if self.nested_folders {
            ScanLayout::Nested
        } else {
            ScanLayout::Flat
        }
    }

    /// File source restricted to the configured extensions
    #[must_use]
    pub fn file_source(&self) -> LocalFileSource {
        LocalFileSource::new(&self.extensions)
    }

    /// Classifier with the configured extra stop words
    #[must_use]
    pub fn classifier(&self) -> Classifier {
        Classifier::new().with_stop_words(&self.stop_words)
    }
}
