//! Grocery item domain model.
//!
//! # Responsibility
//! - Define the normalization output, the category assignment and the
//!   persisted item shape.
//!
//! # Invariants
//! - `ItemRecord` holds a copy of its assignment, never a reference into the
//!   assignment cache.
//! - `confidence` is always within `[0, 1]`.

use crate::model::category::GroceryCategory;
use crate::model::list::NoteId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a grocery item.
pub type ItemId = Uuid;

/// Confidence attached to entries loaded from the seed dictionary.
pub const SEED_CONFIDENCE: f64 = 0.95;
/// Confidence attached to user corrections.
pub const CORRECTION_CONFIDENCE: f64 = 1.0;
/// Confidence attached to the uncategorized fallback.
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Output of the text normalizer for one raw line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedItem {
    /// Input exactly as received.
    pub raw_text: String,
    /// Lowercase singular phrase, used as the assignment cache key. May be empty.
    pub normalized_text: String,
    /// Leading or trailing quantity token such as `2 kg` or `3x`.
    pub quantity: Option<String>,
}

/// Why an assignment has its current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentSource {
    /// Loaded from the static dictionary at startup.
    Seed,
    /// Written by a user correction.
    Correction,
    /// Synthesized on a cache miss.
    Fallback,
}

impl AssignmentSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seed => "seed",
            Self::Correction => "correction",
            Self::Fallback => "fallback",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "seed" => Some(Self::Seed),
            "correction" => Some(Self::Correction),
            "fallback" => Some(Self::Fallback),
            _ => None,
        }
    }
}

/// Category assignment for one normalized phrase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub category: GroceryCategory,
    pub emoji: String,
    pub confidence: f64,
    pub source: AssignmentSource,
}

impl Assignment {
    /// Seed dictionary entry.
    pub fn seed(category: GroceryCategory, emoji: impl Into<String>) -> Self {
        Self {
            category,
            emoji: emoji.into(),
            confidence: SEED_CONFIDENCE,
            source: AssignmentSource::Seed,
        }
    }

    /// User correction entry.
    pub fn correction(category: GroceryCategory, emoji: impl Into<String>) -> Self {
        Self {
            category,
            emoji: emoji.into(),
            confidence: CORRECTION_CONFIDENCE,
            source: AssignmentSource::Correction,
        }
    }

    /// Uncategorized result used when nothing is cached for a phrase.
    pub fn fallback() -> Self {
        Self {
            category: GroceryCategory::Other,
            emoji: GroceryCategory::Other.default_emoji().to_string(),
            confidence: FALLBACK_CONFIDENCE,
            source: AssignmentSource::Fallback,
        }
    }
}

/// Normalizer output combined with its assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedItem {
    pub raw_text: String,
    pub normalized_text: String,
    pub quantity: Option<String>,
    pub category: GroceryCategory,
    pub emoji: String,
    pub source: AssignmentSource,
    pub confidence: f64,
}

impl ClassifiedItem {
    pub fn new(normalized: NormalizedItem, assignment: Assignment) -> Self {
        Self {
            raw_text: normalized.raw_text,
            normalized_text: normalized.normalized_text,
            quantity: normalized.quantity,
            category: assignment.category,
            emoji: assignment.emoji,
            source: assignment.source,
            confidence: assignment.confidence,
        }
    }

    pub fn assignment(&self) -> Assignment {
        Assignment {
            category: self.category,
            emoji: self.emoji.clone(),
            confidence: self.confidence,
            source: self.source,
        }
    }
}

/// Write model for inserting a freshly classified item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub id: ItemId,
    pub note_id: NoteId,
    pub classified: ClassifiedItem,
}

impl ItemDraft {
    /// Creates a draft with a generated stable ID.
    pub fn new(note_id: NoteId, classified: ClassifiedItem) -> Self {
        Self {
            id: Uuid::new_v4(),
            note_id,
            classified,
        }
    }
}

/// Persisted grocery item owned by a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    pub note_id: NoteId,
    pub raw_text: String,
    pub normalized_text: String,
    pub quantity: Option<String>,
    pub category: GroceryCategory,
    pub emoji: String,
    pub source: AssignmentSource,
    pub confidence: f64,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl ItemRecord {
    /// Copy of the assignment currently stored on this item.
    pub fn assignment(&self) -> Assignment {
        Assignment {
            category: self.category,
            emoji: self.emoji.clone(),
            confidence: self.confidence,
            source: self.source,
        }
    }

    /// Returns a copy with classification fields replaced by `assignment`.
    pub fn with_assignment(&self, assignment: Assignment) -> Self {
        Self {
            category: assignment.category,
            emoji: assignment.emoji,
            confidence: assignment.confidence,
            source: assignment.source,
            ..self.clone()
        }
    }
}
