//! Static starter dictionary for the assignment cache.
//!
//! # Responsibility
//! - Parse the built-in `normalized_text -> {category, emoji}` dictionary.
//! - Load an alternative dictionary file in the same format.
//!
//! # Invariants
//! - Category strings are kept raw here; taxonomy filtering happens when the
//!   cache is seeded.
//!
//! # See also
//! - data/starter-item-assignments.v1.json

use serde::Deserialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const BUILTIN_SEED_JSON: &str = include_str!("../../data/starter-item-assignments.v1.json");

/// One raw dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedEntry {
    pub category: String,
    pub emoji: String,
}

/// Dictionary keyed by normalized phrase, in key order.
pub type SeedDictionary = BTreeMap<String, SeedEntry>;

#[derive(Debug)]
pub enum SeedError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read seed file `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid seed dictionary: {err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Parses the dictionary compiled into this crate.
pub fn builtin_seed_entries() -> Result<SeedDictionary, SeedError> {
    parse_seed_entries(BUILTIN_SEED_JSON)
}

/// Parses a dictionary from JSON text.
pub fn parse_seed_entries(json: &str) -> Result<SeedDictionary, SeedError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses a dictionary file.
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<SeedDictionary, SeedError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_seed_entries(&json)
}
