//! Process-wide category assignment cache.
//!
//! # Responsibility
//! - Map normalized phrases to their current category assignment.
//! - Accept seed entries and user corrections through one write path.
//!
//! # Invariants
//! - At most one assignment per normalized phrase; every write fully
//!   replaces the previous entry, whatever its source.
//! - Each lookup/write holds the lock for exactly one map operation, so a
//!   reader observes the entry before or after a concurrent write.
//! - A poisoned lock is recovered: entries are replaced whole, so the map is
//!   never left with a partially written value.

use crate::model::category::GroceryCategory;
use crate::model::item::Assignment;
use crate::pipeline::seed::{builtin_seed_entries, SeedDictionary, SeedError};
use log::{debug, info};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Outcome of one seed pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    /// Entries dropped because their category is not a taxonomy member.
    pub skipped: usize,
}

/// Concurrency-safe `normalized_text -> Assignment` store.
#[derive(Debug, Default)]
pub struct AssignmentCache {
    entries: RwLock<HashMap<String, Assignment>>,
}

impl AssignmentCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache seeded from the built-in starter dictionary.
    pub fn with_builtin_seed() -> Result<Self, SeedError> {
        let cache = Self::new();
        cache.seed(&builtin_seed_entries()?);
        Ok(cache)
    }

    /// Returns a copy of the assignment stored for `normalized_text`.
    pub fn lookup(&self, normalized_text: &str) -> Option<Assignment> {
        self.read().get(normalized_text).cloned()
    }

    /// Stores `assignment`, replacing any previous entry for the phrase.
    pub fn write(&self, normalized_text: impl Into<String>, assignment: Assignment) {
        self.write_guard()
            .insert(normalized_text.into(), assignment);
    }

    /// Inserts dictionary entries as seed assignments.
    ///
    /// Entries whose category is not a taxonomy member are skipped without
    /// error. Seeded entries go through the same overwrite path as
    /// corrections.
    pub fn seed(&self, entries: &SeedDictionary) -> SeedReport {
        let mut report = SeedReport::default();
        for (normalized_text, entry) in entries {
            match entry.category.parse::<GroceryCategory>() {
                Ok(category) => {
                    self.write(
                        normalized_text.as_str(),
                        Assignment::seed(category, entry.emoji.as_str()),
                    );
                    report.inserted += 1;
                }
                Err(_) => {
                    debug!(
                        "event=seed_skip module=pipeline reason=unknown_category category_len={}",
                        entry.category.chars().count()
                    );
                    report.skipped += 1;
                }
            }
        }

        info!(
            "event=seed_load module=pipeline status=ok inserted={} skipped={}",
            report.inserted, report.skipped
        );
        report
    }

    /// Number of cached phrases.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Assignment>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, HashMap<String, Assignment>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::AssignmentCache;

    #[test]
    fn builtin_seed_populates_cache() {
        let cache = AssignmentCache::with_builtin_seed().expect("builtin seed should load");
        assert!(!cache.is_empty());
        assert!(cache.lookup("tomato").is_some());
        assert!(cache.lookup("dragonfruit").is_none());
    }
}
