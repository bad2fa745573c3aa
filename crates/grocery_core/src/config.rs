//! Runtime configuration resolved from the process environment.
//!
//! # Responsibility
//! - Resolve log, storage and seed settings from `GROCERY_*` variables.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - An unset `GROCERY_DB_PATH` selects in-memory storage.
//! - An unset `GROCERY_SEED_PATH` selects the built-in seed dictionary.

use crate::logging::{default_log_level, init_logging, parse_level, LoggingError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_LOG_LEVEL: &str = "GROCERY_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "GROCERY_LOG_DIR";
pub const ENV_DB_PATH: &str = "GROCERY_DB_PATH";
pub const ENV_SEED_PATH: &str = "GROCERY_SEED_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(err) => write!(f, "invalid {ENV_LOG_LEVEL}: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidLogLevel(err) => Some(err),
        }
    }
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryConfig {
    /// Canonical level name (`trace|debug|info|warn|error`).
    pub log_level: &'static str,
    /// File logging is disabled when `None`.
    pub log_dir: Option<PathBuf>,
    /// SQLite file; `None` keeps storage in memory.
    pub db_path: Option<PathBuf>,
    /// Alternative seed dictionary file.
    pub seed_path: Option<PathBuf>,
}

impl Default for GroceryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: None,
            db_path: None,
            seed_path: None,
        }
    }
}

impl GroceryConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|trimmed| !trimmed.is_empty())
        };

        let log_level = match value(ENV_LOG_LEVEL) {
            Some(raw) => parse_level(&raw).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        Ok(Self {
            log_level,
            log_dir: value(ENV_LOG_DIR).map(PathBuf::from),
            db_path: value(ENV_DB_PATH).map(PathBuf::from),
            seed_path: value(ENV_SEED_PATH).map(PathBuf::from),
        })
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns `Ok(false)` when logging is not configured.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        let Some(log_dir) = self.log_dir.as_deref() else {
            return Ok(false);
        };
        init_logging(self.log_level, &path_text(log_dir))?;
        Ok(true)
    }
}

fn path_text(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
