use grocery_core::pipeline::correction::correct_item;
use grocery_core::{Analyzer, AssignmentCache, AssignmentSource, GroceryCategory, ItemRecord};
use std::sync::Arc;
use uuid::Uuid;

fn seeded_analyzer() -> Analyzer {
    Analyzer::new(Arc::new(AssignmentCache::with_builtin_seed().unwrap()))
}

fn stored(analyzer: &Analyzer, raw_text: &str) -> ItemRecord {
    let classified = analyzer.analyze_one(raw_text);
    ItemRecord {
        id: Uuid::new_v4(),
        note_id: Uuid::new_v4(),
        raw_text: classified.raw_text,
        normalized_text: classified.normalized_text,
        quantity: classified.quantity,
        category: classified.category,
        emoji: classified.emoji,
        source: classified.source,
        confidence: classified.confidence,
        created_at: 0,
        updated_at: 0,
    }
}

#[test]
fn seeded_phrase_is_classified_from_seed() {
    let analyzer = seeded_analyzer();
    let item = analyzer.analyze_one("2 tomatoes");

    assert_eq!(item.raw_text, "2 tomatoes");
    assert_eq!(item.normalized_text, "tomato");
    assert_eq!(item.category, GroceryCategory::Produce);
    assert_eq!(item.emoji, "🍅");
    assert_eq!(item.source, AssignmentSource::Seed);
    assert_eq!(item.confidence, 0.95);
}

#[test]
fn unknown_phrase_falls_back_to_other() {
    let analyzer = seeded_analyzer();
    let item = analyzer.analyze_one("Dragonfruit");

    assert_eq!(item.normalized_text, "dragonfruit");
    assert_eq!(item.category, GroceryCategory::Other);
    assert_eq!(item.emoji, "🛒");
    assert_eq!(item.source, AssignmentSource::Fallback);
    assert_eq!(item.confidence, 0.3);
}

#[test]
fn empty_normalization_is_a_fallback_not_an_error() {
    let analyzer = seeded_analyzer();
    let item = analyzer.analyze_one("!!!");
    assert_eq!(item.normalized_text, "");
    assert_eq!(item.source, AssignmentSource::Fallback);
}

#[test]
fn analyze_many_preserves_input_order() {
    let analyzer = seeded_analyzer();
    let items = analyzer.analyze_many(&["- Milk", "dragonfruit", "2 kg apples"]);

    let phrases = items
        .iter()
        .map(|item| item.normalized_text.as_str())
        .collect::<Vec<_>>();
    assert_eq!(phrases, ["milk", "dragonfruit", "apple"]);
    assert_eq!(items[2].quantity.as_deref(), Some("2 kg"));
    assert_eq!(items[1].source, AssignmentSource::Fallback);
}

#[test]
fn correction_is_reused_for_later_items_with_same_phrase() {
    let analyzer = seeded_analyzer();
    let first = stored(&analyzer, "Dragonfruit");
    assert_eq!(first.source, AssignmentSource::Fallback);

    let corrected = correct_item(analyzer.cache(), &first, GroceryCategory::Produce, "🥭");
    assert_eq!(corrected.category, GroceryCategory::Produce);
    assert_eq!(corrected.emoji, "🥭");
    assert_eq!(corrected.source, AssignmentSource::Correction);
    assert_eq!(corrected.confidence, 1.0);
    assert_eq!(corrected.raw_text, first.raw_text);

    let later = analyzer.analyze_one("2 dragonfruits");
    assert_eq!(later.normalized_text, "dragonfruit");
    assert_eq!(later.category, GroceryCategory::Produce);
    assert_eq!(later.emoji, "🥭");
    assert_eq!(later.source, AssignmentSource::Correction);
    assert_eq!(later.confidence, 1.0);
}

#[test]
fn correction_overrides_seed_entry() {
    let analyzer = seeded_analyzer();
    let item = stored(&analyzer, "2 tomatoes");
    assert_eq!(item.source, AssignmentSource::Seed);

    correct_item(analyzer.cache(), &item, GroceryCategory::Canned, "🥫");

    let again = analyzer.analyze_one("Tomatoes");
    assert_eq!(again.category, GroceryCategory::Canned);
    assert_eq!(again.source, AssignmentSource::Correction);
}

#[test]
fn correction_to_other_is_accepted() {
    let analyzer = seeded_analyzer();
    let item = stored(&analyzer, "milk");

    correct_item(analyzer.cache(), &item, GroceryCategory::Other, "🛒");

    let again = analyzer.analyze_one("MILK");
    assert_eq!(again.category, GroceryCategory::Other);
    assert_eq!(again.source, AssignmentSource::Correction);
    assert_eq!(again.confidence, 1.0);
}
