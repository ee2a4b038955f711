//! Board configuration.
//!
//! Configuration is read from a TOML file with optional sections:
//!
//! ```toml
//! [store]
//! collection = "tasks"
//! order_by = "priority"
//!
//! [board]
//! assignee_display_limit = 4
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Missing keys fall back to compiled defaults.

use crate::task::ports::CollectionQuery;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading board configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// A value parsed but is not usable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// `[store]` section: where tasks live and how the live query is ordered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Collection holding task documents.
    pub collection: String,
    /// Field the live query orders by.
    pub order_by: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            collection: "tasks".to_owned(),
            order_by: "priority".to_owned(),
        }
    }
}

/// `[board]` section: presentation-facing limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BoardDisplayConfig {
    /// Maximum number of assignees shown on a task card before the overflow
    /// badge takes over.
    pub assignee_display_limit: usize,
}

impl Default for BoardDisplayConfig {
    fn default() -> Self {
        Self {
            assignee_display_limit: 4,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

/// Fully resolved board configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Store settings.
    pub store: StoreConfig,
    /// Board display settings.
    pub board: BoardDisplayConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl BoardConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseToml`] for malformed TOML and
    /// [`ConfigError::Invalid`] when the collection name is blank.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `explicit_path`, or from
    /// `<config dir>/taskboard/config.toml` when no path is given.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit_path {
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;
            return Self::from_toml_str(&contents);
        }

        let Some(config_dir) = dirs::config_dir() else {
            return Ok(Self::default());
        };
        let path = config_dir.join("taskboard").join("config.toml");
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::ReadFile { path, source }),
        }
    }

    /// Returns the live query over the task collection.
    #[must_use]
    pub fn task_query(&self) -> CollectionQuery {
        let query = CollectionQuery::new(self.store.collection.clone());
        if self.store.order_by.is_empty() {
            query
        } else {
            query.ordered_by(self.store.order_by.clone())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.store.collection.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "store.collection must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}
