//! List repository contract and SQLite implementation.
//!
//! # Invariants
//! - `share_token` is unique across lists.
//! - Title updates refresh `updated_at`.

use crate::model::list::{ListId, ListRecord};
use crate::repo::{parse_uuid, RepoError, RepoResult, NOW_MS_SQL};
use rusqlite::{params, Connection, Row};

const LIST_SELECT_SQL: &str = "SELECT
    id,
    title,
    share_token,
    created_at,
    updated_at
FROM lists";

/// Repository interface for shared lists.
pub trait ListRepository {
    fn create_list(&self, id: ListId, title: &str, share_token: &str) -> RepoResult<ListId>;
    fn get_list(&self, id: ListId) -> RepoResult<Option<ListRecord>>;
    fn get_list_by_token(&self, share_token: &str) -> RepoResult<Option<ListRecord>>;
    fn update_list_title(&self, id: ListId, title: &str) -> RepoResult<()>;
}

/// SQLite-backed list repository.
pub struct SqliteListRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteListRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ListRepository for SqliteListRepository<'_> {
    fn create_list(&self, id: ListId, title: &str, share_token: &str) -> RepoResult<ListId> {
        self.conn.execute(
            "INSERT INTO lists (id, title, share_token) VALUES (?1, ?2, ?3);",
            params![id.to_string(), title, share_token],
        )?;
        Ok(id)
    }

    fn get_list(&self, id: ListId) -> RepoResult<Option<ListRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LIST_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_list_row(row)?)),
            None => Ok(None),
        }
    }

    fn get_list_by_token(&self, share_token: &str) -> RepoResult<Option<ListRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LIST_SELECT_SQL} WHERE share_token = ?1;"))?;
        let mut rows = stmt.query([share_token])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_list_row(row)?)),
            None => Ok(None),
        }
    }

    fn update_list_title(&self, id: ListId, title: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!("UPDATE lists SET title = ?2, updated_at = {NOW_MS_SQL} WHERE id = ?1;"),
            params![id.to_string(), title],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "list", id });
        }
        Ok(())
    }
}

fn parse_list_row(row: &Row<'_>) -> RepoResult<ListRecord> {
    let id_text: String = row.get("id")?;
    Ok(ListRecord {
        id: parse_uuid(&id_text, "lists.id")?,
        title: row.get("title")?,
        share_token: row.get("share_token")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
