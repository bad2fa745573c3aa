//! List and note use-case service.
//!
//! # Responsibility
//! - Create shared lists together with their starter note.
//! - Provide note create/update/delete APIs scoped to a list.
//!
//! # Invariants
//! - Every list starts with exactly one note titled "Groceries".
//! - Blank titles never overwrite stored titles.
//! - Deleting a note removes its items.

use crate::model::list::{
    generate_share_token, ListId, ListRecord, NoteId, NotePatch, NoteRecord, DEFAULT_LIST_TITLE,
    DEFAULT_NOTE_TITLE, STARTER_NOTE_TITLE,
};
use crate::repo::list_repo::ListRepository;
use crate::repo::note_repo::NoteRepository;
use crate::repo::RepoResult;
use crate::service::{ServiceError, ServiceResult};
use log::info;
use serde::Serialize;
use uuid::Uuid;

/// Result of creating a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedList {
    pub list: ListRecord,
    pub starter_note: NoteRecord,
}

/// List/note service facade over repository implementations.
pub struct ListService<L: ListRepository, N: NoteRepository> {
    lists: L,
    notes: N,
}

impl<L: ListRepository, N: NoteRepository> ListService<L, N> {
    pub fn new(lists: L, notes: N) -> Self {
        Self { lists, notes }
    }

    /// Creates a list with a fresh share token and its starter note.
    pub fn create_list(&self, title: &str) -> ServiceResult<CreatedList> {
        let title = non_blank(title).unwrap_or(DEFAULT_LIST_TITLE);
        let list_id = self
            .lists
            .create_list(Uuid::new_v4(), title, &generate_share_token())?;
        let list = self
            .lists
            .get_list(list_id)?
            .ok_or(ServiceError::InconsistentState(
                "created list not found in read-back",
            ))?;

        let starter_note = self.insert_note(list.id, STARTER_NOTE_TITLE, None)?;
        info!("event=list_create module=service status=ok");
        Ok(CreatedList { list, starter_note })
    }

    /// Resolves a list from its share token.
    pub fn get_list_by_token(&self, share_token: &str) -> RepoResult<Option<ListRecord>> {
        self.lists.get_list_by_token(share_token)
    }

    /// Renames a list. A blank title keeps the current one.
    pub fn update_list_title(&self, list_id: ListId, title: &str) -> ServiceResult<ListRecord> {
        if let Some(title) = non_blank(title) {
            self.lists.update_list_title(list_id, title)?;
        }
        self.lists
            .get_list(list_id)?
            .ok_or(ServiceError::NotFound {
                entity: "list",
                id: list_id,
            })
    }

    pub fn list_notes(&self, list_id: ListId) -> RepoResult<Vec<NoteRecord>> {
        self.notes.list_notes_for_list(list_id)
    }

    pub fn get_note(&self, note_id: NoteId) -> RepoResult<Option<NoteRecord>> {
        self.notes.get_note(note_id)
    }

    /// Creates a note. A blank title becomes "Untitled note".
    pub fn create_note(
        &self,
        list_id: ListId,
        title: &str,
        body: Option<&str>,
    ) -> ServiceResult<NoteRecord> {
        let title = non_blank(title).unwrap_or(DEFAULT_NOTE_TITLE);
        self.insert_note(list_id, title, body)
    }

    /// Applies a partial update. Blank titles are ignored.
    pub fn update_note(&self, note_id: NoteId, patch: &NotePatch) -> ServiceResult<NoteRecord> {
        let current = self
            .notes
            .get_note(note_id)?
            .ok_or(ServiceError::NotFound {
                entity: "note",
                id: note_id,
            })?;

        let title = patch
            .title
            .as_deref()
            .and_then(non_blank)
            .unwrap_or(current.title.as_str());
        let body = match &patch.body {
            Some(next) => next.as_deref(),
            None => current.body.as_deref(),
        };

        self.notes.update_note_full(note_id, title, body)?;
        self.notes
            .get_note(note_id)?
            .ok_or(ServiceError::InconsistentState(
                "updated note not found in read-back",
            ))
    }

    /// Deletes a note and all of its items.
    pub fn delete_note(&self, note_id: NoteId) -> ServiceResult<()> {
        self.notes.delete_note(note_id)?;
        info!("event=note_delete module=service status=ok");
        Ok(())
    }

    fn insert_note(
        &self,
        list_id: ListId,
        title: &str,
        body: Option<&str>,
    ) -> ServiceResult<NoteRecord> {
        let note_id = self
            .notes
            .create_note(Uuid::new_v4(), list_id, title, body)?;
        self.notes
            .get_note(note_id)?
            .ok_or(ServiceError::InconsistentState(
                "created note not found in read-back",
            ))
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
