//! Configuration management for rollbook.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::blob::{self, BlobStore, FileBlobStore, MemoryBlobStore, SqliteBlobStore};
use crate::error::{Error, Result};
use crate::validate::Rules;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "rollbook";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "records.db";

/// Default directory name for the file backend.
const BLOB_DIR_NAME: &str = "blobs";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "ROLLBOOK_";

/// Separates the section from the field in an environment variable name, as in
/// `ROLLBOOK_VALIDATION__RESTRICT_GENDER`. Field names contain single
/// underscores, so a single underscore cannot be the separator.
const ENV_SEPARATOR: &str = "__";

/// Default key holding the record collection.
pub const DEFAULT_KEY: &str = "student-records";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (`ROLLBOOK_<SECTION>__<FIELD>`)
/// 2. TOML config file at `~/.config/rollbook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Validation configuration.
    pub validation: ValidationConfig,
}

/// Which blob store holds the records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// A single `SQLite` database file.
    #[default]
    Sqlite,
    /// One JSON file per key in a directory.
    File,
    /// Process memory only; nothing survives exit.
    Memory,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite => write!(f, "sqlite"),
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Blob store backend.
    pub backend: Backend,
    /// Path to the database file for the `sqlite` backend.
    /// Defaults to `~/.local/share/rollbook/records.db`
    pub database_path: Option<PathBuf>,
    /// Directory for the `file` backend.
    /// Defaults to `~/.local/share/rollbook/blobs`
    pub blob_dir: Option<PathBuf>,
    /// Key under which the collection is stored.
    pub key: String,
}

/// Validation rules beyond the required-field checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Regex a registration number must fully match.
    pub reg_no_pattern: Option<String>,
    /// Only accept the listed gender options.
    pub restrict_gender: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            database_path: None,
            blob_dir: None,
            key: DEFAULT_KEY.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        blob::check_key(&self.storage.key).map_err(|e| Error::ConfigValidation {
            message: format!("storage.key: {e}"),
        })?;
        self.rules()?;
        Ok(())
    }

    /// Build validation rules from the `validation` section.
    ///
    /// # Errors
    ///
    /// Returns an error if `reg_no_pattern` is not a valid regex.
    pub fn rules(&self) -> Result<Rules> {
        let reg_no_pattern = self
            .validation
            .reg_no_pattern
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|_| Error::ConfigValidation {
                    message: format!("invalid regex pattern: {pattern}"),
                })
            })
            .transpose()?;

        Ok(Rules {
            reg_no_pattern,
            restrict_gender: self.validation.restrict_gender,
        })
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the blob directory, resolving defaults if not set.
    #[must_use]
    pub fn blob_dir(&self) -> PathBuf {
        self.storage
            .blob_dir
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(BLOB_DIR_NAME))
    }

    /// Open the configured blob store.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing database or directory cannot be opened.
    pub fn open_blob_store(&self) -> Result<Box<dyn BlobStore>> {
        Ok(match self.storage.backend {
            Backend::Sqlite => Box::new(SqliteBlobStore::open(self.database_path())?),
            Backend::File => Box::new(FileBlobStore::open(self.blob_dir())?),
            Backend::Memory => Box::new(MemoryBlobStore::new()),
        })
    }
}
