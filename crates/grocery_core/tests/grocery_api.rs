use grocery_core::api::{MAX_ANALYZE_BATCH, MIN_SHARE_TOKEN_LEN};
use grocery_core::{
    ApiError, AssignmentSource, CreatedList, GroceryApi, GroceryCategory, GroceryConfig, NotePatch,
};
use uuid::Uuid;

fn api_with_list() -> (GroceryApi, CreatedList) {
    let api = GroceryApi::in_memory().unwrap();
    let created = api.create_list("Weekend shop").unwrap();
    (api, created)
}

#[test]
fn create_list_issues_token_and_starter_note() {
    let (api, created) = api_with_list();

    assert_eq!(created.list.title, "Weekend shop");
    assert!(created.list.share_token.len() >= MIN_SHARE_TOKEN_LEN);
    assert_eq!(created.starter_note.title, "Groceries");
    assert_eq!(created.starter_note.list_id, created.list.id);

    let details = api.get_list(&created.list.share_token).unwrap();
    assert_eq!(details.list, created.list);
    assert_eq!(details.notes, vec![created.starter_note]);
}

#[test]
fn blank_list_title_uses_default() {
    let api = GroceryApi::in_memory().unwrap();
    let created = api.create_list("   ").unwrap();
    assert_eq!(created.list.title, "Untitled list");
}

#[test]
fn short_token_is_invalid_and_unknown_token_is_not_found() {
    let api = GroceryApi::in_memory().unwrap();

    let err = api.get_list("short-token").unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));

    let unknown = "f".repeat(MIN_SHARE_TOKEN_LEN);
    assert_eq!(api.get_list(&unknown).unwrap_err(), ApiError::NotFound("list"));
}

#[test]
fn token_is_trimmed_before_lookup() {
    let (api, created) = api_with_list();
    let padded = format!("  {}\n", created.list.share_token);
    assert_eq!(api.get_list(&padded).unwrap().list.id, created.list.id);
}

#[test]
fn list_title_update_ignores_blank_title() {
    let (api, created) = api_with_list();
    let token = created.list.share_token.as_str();

    let renamed = api.update_list_title(token, "Party").unwrap();
    assert_eq!(renamed.title, "Party");

    let kept = api.update_list_title(token, "  ").unwrap();
    assert_eq!(kept.title, "Party");
}

#[test]
fn note_crud_is_scoped_to_list() {
    let (api, created) = api_with_list();
    let token = created.list.share_token.as_str();

    let note = api.create_note(token, "", Some("for the bbq")).unwrap();
    assert_eq!(note.title, "Untitled note");
    assert_eq!(note.body.as_deref(), Some("for the bbq"));

    let notes = api.list_notes(token).unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].id, created.starter_note.id);
    assert_eq!(notes[1].id, note.id);

    let updated = api
        .update_note(
            token,
            note.id,
            &NotePatch {
                title: Some("BBQ".to_string()),
                body: Some(None),
            },
        )
        .unwrap();
    assert_eq!(updated.title, "BBQ");
    assert_eq!(updated.body, None);

    let other = api.create_list("Other").unwrap();
    let err = api
        .get_note(&other.list.share_token, note.id)
        .unwrap_err();
    assert_eq!(err, ApiError::NotFound("note"));

    api.delete_note(token, note.id).unwrap();
    assert_eq!(api.list_notes(token).unwrap().len(), 1);
    assert_eq!(
        api.get_note(token, note.id).unwrap_err(),
        ApiError::NotFound("note")
    );
}

#[test]
fn create_item_classifies_and_stores() {
    let (api, created) = api_with_list();
    let token = created.list.share_token.as_str();
    let note_id = created.starter_note.id;

    let item = api.create_item(token, note_id, "  2 kg apples ").unwrap();
    assert_eq!(item.raw_text, "2 kg apples");
    assert_eq!(item.normalized_text, "apple");
    assert_eq!(item.quantity.as_deref(), Some("2 kg"));
    assert_eq!(item.category, GroceryCategory::Produce);
    assert_eq!(item.source, AssignmentSource::Seed);
    assert_eq!(item.note_id, note_id);

    let details = api.get_note(token, note_id).unwrap();
    assert_eq!(details.items, vec![item]);
}

#[test]
fn create_item_rejects_blank_text() {
    let (api, created) = api_with_list();
    let err = api
        .create_item(&created.list.share_token, created.starter_note.id, " \n")
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn update_item_reanalyzes_from_scratch() {
    let (api, created) = api_with_list();
    let token = created.list.share_token.as_str();
    let note_id = created.starter_note.id;

    let item = api.create_item(token, note_id, "dragonfruit").unwrap();
    assert_eq!(item.source, AssignmentSource::Fallback);

    let updated = api.update_item(token, note_id, item.id, "Milk").unwrap();
    assert_eq!(updated.id, item.id);
    assert_eq!(updated.raw_text, "Milk");
    assert_eq!(updated.normalized_text, "milk");
    assert_eq!(updated.category, GroceryCategory::Dairy);
    assert_eq!(updated.source, AssignmentSource::Seed);
}

#[test]
fn item_must_belong_to_note_for_edit_and_delete() {
    let (api, created) = api_with_list();
    let token = created.list.share_token.as_str();
    let item = api
        .create_item(token, created.starter_note.id, "milk")
        .unwrap();
    let other_note = api.create_note(token, "Other", None).unwrap();

    assert_eq!(
        api.update_item(token, other_note.id, item.id, "eggs")
            .unwrap_err(),
        ApiError::NotFound("item")
    );
    assert_eq!(
        api.delete_item(token, other_note.id, item.id).unwrap_err(),
        ApiError::NotFound("item")
    );

    api.delete_item(token, created.starter_note.id, item.id)
        .unwrap();
    assert!(api
        .list_items(token, created.starter_note.id)
        .unwrap()
        .is_empty());
}

#[test]
fn deleting_note_removes_its_items() {
    let (api, created) = api_with_list();
    let token = created.list.share_token.as_str();
    let note = api.create_note(token, "Extra", None).unwrap();
    let item = api.create_item(token, note.id, "bread").unwrap();

    api.delete_note(token, note.id).unwrap();

    let err = api
        .correct_item(token, item.id, "bakery", "🍞")
        .unwrap_err();
    assert_eq!(err, ApiError::NotFound("item"));
}

#[test]
fn correction_updates_item_and_later_items() {
    let (api, created) = api_with_list();
    let token = created.list.share_token.as_str();
    let note_id = created.starter_note.id;

    let first = api.create_item(token, note_id, "Dragonfruit").unwrap();
    let corrected = api
        .correct_item(token, first.id, "produce", " 🥭 ")
        .unwrap();
    assert_eq!(corrected.id, first.id);
    assert_eq!(corrected.category, GroceryCategory::Produce);
    assert_eq!(corrected.emoji, "🥭");
    assert_eq!(corrected.source, AssignmentSource::Correction);
    assert_eq!(corrected.confidence, 1.0);

    let later = api.create_item(token, note_id, "2 dragonfruits").unwrap();
    assert_eq!(later.category, GroceryCategory::Produce);
    assert_eq!(later.emoji, "🥭");
    assert_eq!(later.source, AssignmentSource::Correction);

    let batch = api.analyze_items(token, &["dragonfruit"]).unwrap();
    assert_eq!(batch[0].source, AssignmentSource::Correction);
}

#[test]
fn correction_does_not_touch_existing_items() {
    let (api, created) = api_with_list();
    let token = created.list.share_token.as_str();
    let note_id = created.starter_note.id;

    let first = api.create_item(token, note_id, "tomatoes").unwrap();
    let second = api.create_item(token, note_id, "2 tomatoes").unwrap();

    api.correct_item(token, first.id, "canned", "🥫").unwrap();

    let items = api.list_items(token, note_id).unwrap();
    let untouched = items.iter().find(|item| item.id == second.id).unwrap();
    assert_eq!(untouched.category, GroceryCategory::Produce);
    assert_eq!(untouched.source, AssignmentSource::Seed);
}

#[test]
fn correction_validates_category_emoji_and_list_scope() {
    let (api, created) = api_with_list();
    let token = created.list.share_token.as_str();
    let item = api
        .create_item(token, created.starter_note.id, "milk")
        .unwrap();

    assert!(matches!(
        api.correct_item(token, item.id, "vehicles", "🚗"),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        api.correct_item(token, item.id, "dairy", "   "),
        Err(ApiError::InvalidInput(_))
    ));
    assert_eq!(
        api.correct_item(token, Uuid::new_v4(), "dairy", "🥛")
            .unwrap_err(),
        ApiError::NotFound("item")
    );

    let other = api.create_list("Other").unwrap();
    assert_eq!(
        api.correct_item(&other.list.share_token, item.id, "dairy", "🥛")
            .unwrap_err(),
        ApiError::NotFound("item")
    );
}

#[test]
fn analyze_batch_trims_and_enforces_bounds() {
    let (api, created) = api_with_list();
    let token = created.list.share_token.as_str();

    let items = api
        .analyze_items(token, &["  - Milk", "", "   ", "2 kg apples"])
        .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].raw_text, "- Milk");
    assert_eq!(items[1].normalized_text, "apple");

    assert_eq!(
        api.analyze_items(token, &["", "  "]).unwrap_err(),
        ApiError::InvalidInput("items[] is required.".to_string())
    );

    let at_limit = vec!["milk"; MAX_ANALYZE_BATCH];
    assert_eq!(
        api.analyze_items(token, at_limit.as_slice()).unwrap().len(),
        MAX_ANALYZE_BATCH
    );

    let over_limit = vec!["milk"; MAX_ANALYZE_BATCH + 1];
    assert_eq!(
        api.analyze_items(token, over_limit.as_slice()).unwrap_err(),
        ApiError::InvalidInput("Maximum 100 items per batch.".to_string())
    );
}

#[test]
fn analyze_batch_does_not_store_items() {
    let (api, created) = api_with_list();
    let token = created.list.share_token.as_str();

    api.analyze_items(token, &["milk", "eggs"]).unwrap();
    assert!(api
        .list_items(token, created.starter_note.id)
        .unwrap()
        .is_empty());
}

#[test]
fn list_view_returns_first_note_with_items() {
    let (api, created) = api_with_list();
    let token = created.list.share_token.as_str();
    api.create_item(token, created.starter_note.id, "milk")
        .unwrap();
    api.create_note(token, "Second", None).unwrap();

    let view = api.list_view(token).unwrap();
    assert_eq!(view.list.id, created.list.id);
    assert_eq!(view.notes.len(), 2);
    assert_eq!(view.first_note_id, Some(created.starter_note.id));
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].normalized_text, "milk");

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["items"][0]["category"], "dairy");
    assert_eq!(json["items"][0]["source"], "seed");
}

#[test]
fn file_backed_storage_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = GroceryConfig {
        db_path: Some(dir.path().join("grocery.db")),
        ..GroceryConfig::default()
    };

    let token = {
        let api = GroceryApi::open(&config).unwrap();
        let created = api.create_list("Persistent").unwrap();
        api.create_item(&created.list.share_token, created.starter_note.id, "milk")
            .unwrap();
        created.list.share_token
    };

    let reopened = GroceryApi::open(&config).unwrap();
    let view = reopened.list_view(&token).unwrap();
    assert_eq!(view.list.title, "Persistent");
    assert_eq!(view.items.len(), 1);
}

#[test]
fn custom_seed_file_replaces_builtin_dictionary() {
    let dir = tempfile::tempdir().unwrap();
    let seed_path = dir.path().join("seed.json");
    std::fs::write(
        &seed_path,
        r#"{ "dragonfruit": { "category": "produce", "emoji": "🐉" } }"#,
    )
    .unwrap();
    let config = GroceryConfig {
        seed_path: Some(seed_path),
        ..GroceryConfig::default()
    };

    let api = GroceryApi::open(&config).unwrap();
    assert_eq!(api.cache().len(), 1);

    let created = api.create_list("Seeded").unwrap();
    let items = api
        .analyze_items(&created.list.share_token, &["dragonfruit", "milk"])
        .unwrap();
    assert_eq!(items[0].emoji, "🐉");
    assert_eq!(items[1].source, AssignmentSource::Fallback);
}

#[test]
fn missing_seed_file_fails_open() {
    let config = GroceryConfig {
        seed_path: Some("/nonexistent/grocery-seed.json".into()),
        ..GroceryConfig::default()
    };
    assert!(matches!(
        GroceryApi::open(&config),
        Err(ApiError::Internal(_))
    ));
}
