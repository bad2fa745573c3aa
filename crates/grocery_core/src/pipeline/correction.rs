//! User correction feedback loop.
//!
//! # Responsibility
//! - Apply a user-chosen category/emoji to one item.
//! - Write the same choice back into the assignment cache so every later
//!   item normalizing to the same phrase is classified the same way.
//!
//! # Invariants
//! - Corrected assignments always carry `source=correction, confidence=1`.
//! - Items created before the correction keep their stored assignment.

use crate::model::category::GroceryCategory;
use crate::model::item::{Assignment, ItemRecord};
use crate::pipeline::cache::AssignmentCache;
use log::info;

/// Returns `item` with the correction applied and records it in `cache`.
///
/// `emoji` is stored as given; trimming and the non-empty check belong to
/// the caller. Any taxonomy member is accepted, `other` included.
pub fn correct_item(
    cache: &AssignmentCache,
    item: &ItemRecord,
    category: GroceryCategory,
    emoji: &str,
) -> ItemRecord {
    let corrected = item.with_assignment(Assignment::correction(category, emoji));
    remember_correction(cache, item, &corrected);
    corrected
}

/// Writes an already stored correction into `cache`.
///
/// `corrected` must be the persisted state of `previous`; callers that
/// store items call this only after the store succeeded.
pub fn remember_correction(
    cache: &AssignmentCache,
    previous: &ItemRecord,
    corrected: &ItemRecord,
) {
    cache.write(corrected.normalized_text.as_str(), corrected.assignment());

    info!(
        "event=item_correct module=pipeline status=ok previous_source={} previous_category={} category={}",
        previous.source.as_str(),
        previous.category,
        corrected.category
    );
}

#[cfg(test)]
mod tests {
    use super::correct_item;
    use crate::model::category::GroceryCategory;
    use crate::model::item::{AssignmentSource, ItemRecord};
    use crate::pipeline::cache::AssignmentCache;
    use uuid::Uuid;

    fn fallback_item(normalized_text: &str) -> ItemRecord {
        ItemRecord {
            id: Uuid::new_v4(),
            note_id: Uuid::new_v4(),
            raw_text: normalized_text.to_string(),
            normalized_text: normalized_text.to_string(),
            quantity: None,
            category: GroceryCategory::Other,
            emoji: "🛒".to_string(),
            source: AssignmentSource::Fallback,
            confidence: 0.3,
            created_at: 1_000,
            updated_at: 1_000,
        }
    }

    #[test]
    fn correction_updates_item_and_cache() {
        let cache = AssignmentCache::new();
        let item = fallback_item("dragonfruit");

        let corrected = correct_item(&cache, &item, GroceryCategory::Produce, "🥭");
        assert_eq!(corrected.id, item.id);
        assert_eq!(corrected.category, GroceryCategory::Produce);
        assert_eq!(corrected.source, AssignmentSource::Correction);
        assert!((corrected.confidence - 1.0).abs() < f64::EPSILON);

        let cached = cache.lookup("dragonfruit").expect("correction should be cached");
        assert_eq!(cached.emoji, "🥭");
        assert_eq!(cached.source, AssignmentSource::Correction);
    }

    #[test]
    fn correction_to_other_is_still_a_correction() {
        let cache = AssignmentCache::new();
        let corrected = correct_item(
            &cache,
            &fallback_item("gift card"),
            GroceryCategory::Other,
            "🎁",
        );
        assert_eq!(corrected.source, AssignmentSource::Correction);
        assert_eq!(
            cache.lookup("gift card").map(|a| a.category),
            Some(GroceryCategory::Other)
        );
    }
}
