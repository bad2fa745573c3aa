use grocery_core::db::open_db_in_memory;
use grocery_core::model::item::ItemDraft;
use grocery_core::repo::item_repo::{ItemRepository, SqliteItemRepository};
use grocery_core::repo::list_repo::{ListRepository, SqliteListRepository};
use grocery_core::repo::note_repo::{NoteRepository, SqliteNoteRepository};
use grocery_core::repo::RepoError;
use grocery_core::{Analyzer, AssignmentCache, AssignmentSource, GroceryCategory};
use rusqlite::Connection;
use std::sync::Arc;
use uuid::Uuid;

fn setup_note(conn: &Connection) -> Uuid {
    let list_id = SqliteListRepository::new(conn)
        .create_list(Uuid::new_v4(), "List", &"a".repeat(32))
        .unwrap();
    SqliteNoteRepository::new(conn)
        .create_note(Uuid::new_v4(), list_id, "Groceries", None)
        .unwrap()
}

fn analyzer() -> Analyzer {
    Analyzer::new(Arc::new(AssignmentCache::with_builtin_seed().unwrap()))
}

#[test]
fn items_are_listed_in_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let note_id = setup_note(&conn);
    let repo = SqliteItemRepository::new(&conn);
    let analyzer = analyzer();

    let ids = ["milk", "eggs", "bread"]
        .into_iter()
        .map(|raw| {
            repo.create_item(&ItemDraft::new(note_id, analyzer.analyze_one(raw)))
                .unwrap()
        })
        .collect::<Vec<_>>();

    let listed = repo
        .list_items_for_note(note_id)
        .unwrap()
        .into_iter()
        .map(|item| item.id)
        .collect::<Vec<_>>();
    assert_eq!(listed, ids);
}

#[test]
fn apply_assignment_replaces_only_classification() {
    let conn = open_db_in_memory().unwrap();
    let note_id = setup_note(&conn);
    let repo = SqliteItemRepository::new(&conn);

    let id = repo
        .create_item(&ItemDraft::new(note_id, analyzer().analyze_one("2 kg apples")))
        .unwrap();
    let before = repo.get_item(id).unwrap().unwrap();

    let corrected = before.with_assignment(grocery_core::Assignment::correction(
        GroceryCategory::Snack,
        "🍏",
    ));
    repo.apply_assignment(id, &corrected.assignment()).unwrap();

    let after = repo.get_item(id).unwrap().unwrap();
    assert_eq!(after.raw_text, before.raw_text);
    assert_eq!(after.quantity.as_deref(), Some("2 kg"));
    assert_eq!(after.category, GroceryCategory::Snack);
    assert_eq!(after.source, AssignmentSource::Correction);
}

#[test]
fn missing_item_is_not_found_on_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::new(&conn);
    let missing = Uuid::new_v4();

    let err = repo.delete_item(missing).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "item", id } if id == missing));

    let classified = analyzer().analyze_one("milk");
    let err = repo.replace_item_analysis(missing, &classified).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[test]
fn unknown_stored_category_is_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    let note_id = setup_note(&conn);
    let repo = SqliteItemRepository::new(&conn);
    let id = repo
        .create_item(&ItemDraft::new(note_id, analyzer().analyze_one("milk")))
        .unwrap();

    conn.execute(
        "UPDATE items SET category = 'vehicles' WHERE id = ?1;",
        [id.to_string()],
    )
    .unwrap();

    let err = repo.get_item(id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
