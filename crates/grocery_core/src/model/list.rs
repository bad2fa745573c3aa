//! Shared list and note records.
//!
//! # Invariants
//! - `share_token` is the only handle clients use to reach a list.
//! - A note belongs to exactly one list for its whole lifetime.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ListId = Uuid;
pub type NoteId = Uuid;

/// Title assigned when a list is created without one.
pub const DEFAULT_LIST_TITLE: &str = "Untitled list";
/// Title of the note created together with every list.
pub const STARTER_NOTE_TITLE: &str = "Groceries";
/// Title assigned when a note is created without one.
pub const DEFAULT_NOTE_TITLE: &str = "Untitled note";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecord {
    pub id: ListId,
    pub title: String,
    /// Opaque 64-char hex token.
    pub share_token: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: NoteId,
    pub list_id: ListId,
    pub title: String,
    pub body: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

/// Partial note update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    /// Blank titles are ignored.
    pub title: Option<String>,
    /// `Some(None)` clears the body.
    pub body: Option<Option<String>>,
}

/// Generates a new opaque share token.
pub fn generate_share_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::generate_share_token;

    #[test]
    fn share_tokens_are_long_hex_and_unique() {
        let first = generate_share_token();
        let second = generate_share_token();
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }
}
