//! Raw text classification.
//!
//! # Responsibility
//! - Compose the normalizer and the assignment cache into one call.
//!
//! # Invariants
//! - A cache hit is returned verbatim (category, emoji, confidence, source).
//! - A cache miss yields the `other` fallback; it is never an error.
//! - Batch size is not limited here. Callers enforce request bounds.

use crate::model::item::{Assignment, ClassifiedItem};
use crate::pipeline::cache::AssignmentCache;
use crate::pipeline::normalize::normalize_item;
use log::debug;
use std::sync::Arc;

/// Classifier over a shared assignment cache.
#[derive(Debug, Clone)]
pub struct Analyzer {
    cache: Arc<AssignmentCache>,
}

impl Analyzer {
    pub fn new(cache: Arc<AssignmentCache>) -> Self {
        Self { cache }
    }

    /// Shared cache used for lookups and corrections.
    pub fn cache(&self) -> &Arc<AssignmentCache> {
        &self.cache
    }

    /// Normalizes and classifies one raw line.
    pub fn analyze_one(&self, raw_text: &str) -> ClassifiedItem {
        let normalized = normalize_item(raw_text);
        let assignment = self
            .cache
            .lookup(&normalized.normalized_text)
            .unwrap_or_else(Assignment::fallback);

        debug!(
            "event=item_analyze module=pipeline status=ok source={} category={} normalized_len={} has_quantity={}",
            assignment.source.as_str(),
            assignment.category,
            normalized.normalized_text.chars().count(),
            normalized.quantity.is_some()
        );

        ClassifiedItem::new(normalized, assignment)
    }

    /// Classifies every line independently, preserving input order.
    pub fn analyze_many<S: AsRef<str>>(&self, raw_texts: &[S]) -> Vec<ClassifiedItem> {
        raw_texts
            .iter()
            .map(|raw_text| self.analyze_one(raw_text.as_ref()))
            .collect()
    }
}
