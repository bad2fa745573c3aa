//! Item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist classified items under their parent note.
//! - Replace classification fields on re-analysis or correction.
//!
//! # Invariants
//! - Items store a copy of their assignment; nothing here reads the cache.
//! - Items of one note are returned in creation order.
//! - Category and source columns must decode to known values on read.

use crate::model::category::GroceryCategory;
use crate::model::item::{
    Assignment, AssignmentSource, ClassifiedItem, ItemDraft, ItemId, ItemRecord,
};
use crate::model::list::NoteId;
use crate::repo::{parse_uuid, RepoError, RepoResult, NOW_MS_SQL};
use rusqlite::{params, Connection, Row};

const ITEM_SELECT_SQL: &str = "SELECT
    id,
    note_id,
    raw_text,
    normalized_text,
    quantity,
    category,
    emoji,
    source,
    confidence,
    created_at,
    updated_at
FROM items";

/// Repository interface for grocery items.
pub trait ItemRepository {
    fn create_item(&self, draft: &ItemDraft) -> RepoResult<ItemId>;
    fn get_item(&self, id: ItemId) -> RepoResult<Option<ItemRecord>>;
    fn list_items_for_note(&self, note_id: NoteId) -> RepoResult<Vec<ItemRecord>>;
    /// Replaces raw text, normalization and assignment after an edit.
    fn replace_item_analysis(&self, id: ItemId, classified: &ClassifiedItem) -> RepoResult<()>;
    /// Replaces only the assignment fields.
    fn apply_assignment(&self, id: ItemId, assignment: &Assignment) -> RepoResult<()>;
    fn delete_item(&self, id: ItemId) -> RepoResult<()>;
}

/// SQLite-backed item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn create_item(&self, draft: &ItemDraft) -> RepoResult<ItemId> {
        let item = &draft.classified;
        self.conn.execute(
            "INSERT INTO items (
                id,
                note_id,
                raw_text,
                normalized_text,
                quantity,
                category,
                emoji,
                source,
                confidence
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                draft.id.to_string(),
                draft.note_id.to_string(),
                item.raw_text.as_str(),
                item.normalized_text.as_str(),
                item.quantity.as_deref(),
                item.category.as_str(),
                item.emoji.as_str(),
                item.source.as_str(),
                item.confidence,
            ],
        )?;
        Ok(draft.id)
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<ItemRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_item_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_items_for_note(&self, note_id: NoteId) -> RepoResult<Vec<ItemRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ITEM_SELECT_SQL}
             WHERE note_id = ?1
             ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([note_id.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }
        Ok(items)
    }

    fn replace_item_analysis(&self, id: ItemId, classified: &ClassifiedItem) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!(
                "UPDATE items
                 SET
                    raw_text = ?2,
                    normalized_text = ?3,
                    quantity = ?4,
                    category = ?5,
                    emoji = ?6,
                    source = ?7,
                    confidence = ?8,
                    updated_at = {NOW_MS_SQL}
                 WHERE id = ?1;"
            ),
            params![
                id.to_string(),
                classified.raw_text.as_str(),
                classified.normalized_text.as_str(),
                classified.quantity.as_deref(),
                classified.category.as_str(),
                classified.emoji.as_str(),
                classified.source.as_str(),
                classified.confidence,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "item", id });
        }
        Ok(())
    }

    fn apply_assignment(&self, id: ItemId, assignment: &Assignment) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!(
                "UPDATE items
                 SET
                    category = ?2,
                    emoji = ?3,
                    source = ?4,
                    confidence = ?5,
                    updated_at = {NOW_MS_SQL}
                 WHERE id = ?1;"
            ),
            params![
                id.to_string(),
                assignment.category.as_str(),
                assignment.emoji.as_str(),
                assignment.source.as_str(),
                assignment.confidence,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "item", id });
        }
        Ok(())
    }

    fn delete_item(&self, id: ItemId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM items WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "item", id });
        }
        Ok(())
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<ItemRecord> {
    let id_text: String = row.get("id")?;
    let note_id_text: String = row.get("note_id")?;

    let category_text: String = row.get("category")?;
    let category = category_text.parse::<GroceryCategory>().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in items.category"
        ))
    })?;

    let source_text: String = row.get("source")?;
    let source = AssignmentSource::parse(&source_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid source `{source_text}` in items.source"))
    })?;

    Ok(ItemRecord {
        id: parse_uuid(&id_text, "items.id")?,
        note_id: parse_uuid(&note_id_text, "items.note_id")?,
        raw_text: row.get("raw_text")?,
        normalized_text: row.get("normalized_text")?,
        quantity: row.get("quantity")?,
        category,
        emoji: row.get("emoji")?,
        source,
        confidence: row.get("confidence")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
