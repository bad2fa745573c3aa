//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist notes attached to a shared list.
//! - Own note deletion, which cascades to the note's items.
//!
//! # Invariants
//! - Notes of one list are returned in creation order.
//! - `update_note_full` uses full replacement semantics for title and body.

use crate::model::list::{ListId, NoteId, NoteRecord};
use crate::repo::{parse_uuid, RepoError, RepoResult, NOW_MS_SQL};
use rusqlite::{params, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    list_id,
    title,
    body,
    created_at,
    updated_at
FROM notes";

/// Repository interface for notes.
pub trait NoteRepository {
    fn create_note(
        &self,
        id: NoteId,
        list_id: ListId,
        title: &str,
        body: Option<&str>,
    ) -> RepoResult<NoteId>;
    fn get_note(&self, id: NoteId) -> RepoResult<Option<NoteRecord>>;
    fn list_notes_for_list(&self, list_id: ListId) -> RepoResult<Vec<NoteRecord>>;
    /// Replaces title and body; `updated_at` is refreshed.
    fn update_note_full(&self, id: NoteId, title: &str, body: Option<&str>) -> RepoResult<()>;
    /// Deletes the note and, via foreign key cascade, all of its items.
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(
        &self,
        id: NoteId,
        list_id: ListId,
        title: &str,
        body: Option<&str>,
    ) -> RepoResult<NoteId> {
        self.conn.execute(
            "INSERT INTO notes (id, list_id, title, body) VALUES (?1, ?2, ?3, ?4);",
            params![id.to_string(), list_id.to_string(), title, body],
        )?;
        Ok(id)
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<NoteRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_note_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_notes_for_list(&self, list_id: ListId) -> RepoResult<Vec<NoteRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE list_id = ?1
             ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([list_id.to_string()])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn update_note_full(&self, id: NoteId, title: &str, body: Option<&str>) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!(
                "UPDATE notes
                 SET
                    title = ?2,
                    body = ?3,
                    updated_at = {NOW_MS_SQL}
                 WHERE id = ?1;"
            ),
            params![id.to_string(), title, body],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "note", id });
        }
        Ok(())
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "note", id });
        }
        Ok(())
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<NoteRecord> {
    let id_text: String = row.get("id")?;
    let list_id_text: String = row.get("list_id")?;
    Ok(NoteRecord {
        id: parse_uuid(&id_text, "notes.id")?,
        list_id: parse_uuid(&list_id_text, "notes.list_id")?,
        title: row.get("title")?,
        body: row.get("body")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
