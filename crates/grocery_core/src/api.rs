//! Transport-free boundary API for shared grocery lists.
//!
//! # Responsibility
//! - Validate every caller-supplied value before it reaches the core.
//! - Scope notes and items to the list resolved from a share token.
//! - Map core errors to three stable kinds: invalid input, not found and
//!   internal failure.
//!
//! # Invariants
//! - A share token shorter than `MIN_SHARE_TOKEN_LEN` (after trimming) is
//!   rejected before storage is touched.
//! - A note is only reachable through the list that owns it; an item is only
//!   reachable through its note (edit/delete) or its list (correct).
//! - Storage access is serialized through one connection mutex.

use crate::config::GroceryConfig;
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::category::GroceryCategory;
use crate::model::item::{ClassifiedItem, ItemId, ItemRecord};
use crate::model::list::{ListRecord, NoteId, NotePatch, NoteRecord};
use crate::pipeline::analyzer::Analyzer;
use crate::pipeline::cache::AssignmentCache;
use crate::pipeline::seed::{builtin_seed_entries, load_seed_file, SeedError};
use crate::repo::item_repo::SqliteItemRepository;
use crate::repo::list_repo::SqliteListRepository;
use crate::repo::note_repo::SqliteNoteRepository;
use crate::repo::RepoError;
use crate::service::item_service::ItemService;
use crate::service::list_service::{CreatedList, ListService};
use crate::service::ServiceError;
use log::{error, info, warn};
use rusqlite::Connection;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, PoisonError};

/// Minimum accepted share token length after trimming.
pub const MIN_SHARE_TOKEN_LEN: usize = 24;
/// Maximum number of non-blank lines per analyze request.
pub const MAX_ANALYZE_BATCH: usize = 100;

pub type ApiResult<T> = Result<T, ApiError>;

/// Boundary error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Caller input failed validation. The message is safe to show.
    InvalidInput(String),
    /// The named entity does not exist or is not reachable from the token.
    NotFound(&'static str),
    /// Storage or consistency failure.
    Internal(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "{message}"),
            Self::NotFound(entity) => write!(f, "{entity} not found"),
            Self::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl Error for ApiError {}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::NotFound { entity, .. } => Self::NotFound(entity),
            ServiceError::Repo(err) => Self::from(err),
            ServiceError::InconsistentState(details) => Self::Internal(details.to_string()),
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, .. } => Self::NotFound(entity),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<SeedError> for ApiError {
    fn from(value: SeedError) -> Self {
        Self::Internal(value.to_string())
    }
}

/// A list with all of its notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListDetails {
    pub list: ListRecord,
    pub notes: Vec<NoteRecord>,
}

/// A note with all of its items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteDetails {
    pub note: NoteRecord,
    pub items: Vec<ItemRecord>,
}

/// Everything a list page needs on first load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView {
    pub list: ListRecord,
    pub notes: Vec<NoteRecord>,
    /// First note in creation order, if any.
    pub first_note_id: Option<NoteId>,
    /// Items of `first_note_id`; empty when the list has no notes.
    pub items: Vec<ItemRecord>,
}

type SqliteListService<'conn> =
    ListService<SqliteListRepository<'conn>, SqliteNoteRepository<'conn>>;
type SqliteItemService<'conn> = ItemService<SqliteItemRepository<'conn>>;

/// Grocery list API over one SQLite connection and a shared cache.
pub struct GroceryApi {
    conn: Mutex<Connection>,
    analyzer: Analyzer,
}

impl GroceryApi {
    /// Opens storage and seeds the cache as configured.
    ///
    /// # Errors
    /// - `Internal` when the database cannot be opened or migrated.
    /// - `Internal` when the seed file cannot be read or parsed.
    pub fn open(config: &GroceryConfig) -> ApiResult<Self> {
        let conn = match config.db_path.as_deref() {
            Some(path) => open_db(path)?,
            None => open_db_in_memory()?,
        };
        let entries = match config.seed_path.as_deref() {
            Some(path) => load_seed_file(path)?,
            None => builtin_seed_entries()?,
        };

        let cache = AssignmentCache::new();
        let report = cache.seed(&entries);
        info!(
            "event=api_open module=api status=ok storage={} seed={} seeded={}",
            if config.db_path.is_some() { "file" } else { "memory" },
            if config.seed_path.is_some() { "file" } else { "builtin" },
            report.inserted
        );
        Ok(Self::with_cache(conn, Arc::new(cache)))
    }

    /// In-memory storage with the built-in seed dictionary.
    pub fn in_memory() -> ApiResult<Self> {
        Self::open(&GroceryConfig::default())
    }

    /// Wraps an already migrated connection and an existing cache.
    pub fn with_cache(conn: Connection, cache: Arc<AssignmentCache>) -> Self {
        Self {
            conn: Mutex::new(conn),
            analyzer: Analyzer::new(cache),
        }
    }

    pub fn cache(&self) -> &Arc<AssignmentCache> {
        self.analyzer.cache()
    }

    /// Creates a list with its starter note.
    pub fn create_list(&self, title: &str) -> ApiResult<CreatedList> {
        self.with_conn("create_list", |conn| {
            Ok(list_service(conn).create_list(title)?)
        })
    }

    /// Returns the list and its notes.
    pub fn get_list(&self, share_token: &str) -> ApiResult<ListDetails> {
        self.with_conn("get_list", |conn| {
            let lists = list_service(conn);
            let list = resolve_list(&lists, share_token)?;
            let notes = lists.list_notes(list.id)?;
            Ok(ListDetails { list, notes })
        })
    }

    /// Renames a list. A blank title keeps the current one.
    pub fn update_list_title(&self, share_token: &str, title: &str) -> ApiResult<ListRecord> {
        self.with_conn("update_list_title", |conn| {
            let lists = list_service(conn);
            let list = resolve_list(&lists, share_token)?;
            Ok(lists.update_list_title(list.id, title)?)
        })
    }

    pub fn list_notes(&self, share_token: &str) -> ApiResult<Vec<NoteRecord>> {
        self.with_conn("list_notes", |conn| {
            let lists = list_service(conn);
            let list = resolve_list(&lists, share_token)?;
            Ok(lists.list_notes(list.id)?)
        })
    }

    pub fn create_note(
        &self,
        share_token: &str,
        title: &str,
        body: Option<&str>,
    ) -> ApiResult<NoteRecord> {
        self.with_conn("create_note", |conn| {
            let lists = list_service(conn);
            let list = resolve_list(&lists, share_token)?;
            Ok(lists.create_note(list.id, title, body)?)
        })
    }

    /// Returns one note of the list together with its items.
    pub fn get_note(&self, share_token: &str, note_id: NoteId) -> ApiResult<NoteDetails> {
        self.with_conn("get_note", |conn| {
            let lists = list_service(conn);
            let list = resolve_list(&lists, share_token)?;
            let note = resolve_note(&lists, &list, note_id)?;
            let items = self.item_service(conn).list_items(note.id)?;
            Ok(NoteDetails { note, items })
        })
    }

    pub fn update_note(
        &self,
        share_token: &str,
        note_id: NoteId,
        patch: &NotePatch,
    ) -> ApiResult<NoteRecord> {
        self.with_conn("update_note", |conn| {
            let lists = list_service(conn);
            let list = resolve_list(&lists, share_token)?;
            let note = resolve_note(&lists, &list, note_id)?;
            Ok(lists.update_note(note.id, patch)?)
        })
    }

    /// Deletes a note and its items.
    pub fn delete_note(&self, share_token: &str, note_id: NoteId) -> ApiResult<()> {
        self.with_conn("delete_note", |conn| {
            let lists = list_service(conn);
            let list = resolve_list(&lists, share_token)?;
            let note = resolve_note(&lists, &list, note_id)?;
            Ok(lists.delete_note(note.id)?)
        })
    }

    pub fn list_items(&self, share_token: &str, note_id: NoteId) -> ApiResult<Vec<ItemRecord>> {
        self.with_conn("list_items", |conn| {
            let lists = list_service(conn);
            let list = resolve_list(&lists, share_token)?;
            let note = resolve_note(&lists, &list, note_id)?;
            Ok(self.item_service(conn).list_items(note.id)?)
        })
    }

    /// Classifies `raw_text` and stores it as a new item of the note.
    pub fn create_item(
        &self,
        share_token: &str,
        note_id: NoteId,
        raw_text: &str,
    ) -> ApiResult<ItemRecord> {
        let raw_text = required_text(raw_text, "raw_text is required.")?;
        self.with_conn("create_item", |conn| {
            let lists = list_service(conn);
            let list = resolve_list(&lists, share_token)?;
            let note = resolve_note(&lists, &list, note_id)?;
            Ok(self.item_service(conn).create_item(note.id, raw_text)?)
        })
    }

    /// Replaces the item text and re-classifies it from scratch.
    pub fn update_item(
        &self,
        share_token: &str,
        note_id: NoteId,
        item_id: ItemId,
        raw_text: &str,
    ) -> ApiResult<ItemRecord> {
        let raw_text = required_text(raw_text, "raw_text is required.")?;
        self.with_conn("update_item", |conn| {
            let lists = list_service(conn);
            let list = resolve_list(&lists, share_token)?;
            let note = resolve_note(&lists, &list, note_id)?;
            let items = self.item_service(conn);
            let item = resolve_item_in_note(&items, &note, item_id)?;
            Ok(items.update_item(item.id, raw_text)?)
        })
    }

    pub fn delete_item(&self, share_token: &str, note_id: NoteId, item_id: ItemId) -> ApiResult<()> {
        self.with_conn("delete_item", |conn| {
            let lists = list_service(conn);
            let list = resolve_list(&lists, share_token)?;
            let note = resolve_note(&lists, &list, note_id)?;
            let items = self.item_service(conn);
            let item = resolve_item_in_note(&items, &note, item_id)?;
            Ok(items.delete_item(item.id)?)
        })
    }

    /// Classifies a batch of lines without storing them.
    ///
    /// Lines are trimmed and blank lines dropped before the bounds check.
    ///
    /// # Errors
    /// - `InvalidInput` when no non-blank line remains or more than
    ///   `MAX_ANALYZE_BATCH` remain.
    pub fn analyze_items<S: AsRef<str>>(
        &self,
        share_token: &str,
        raw_texts: &[S],
    ) -> ApiResult<Vec<ClassifiedItem>> {
        let lines = raw_texts
            .iter()
            .map(|raw_text| raw_text.as_ref().trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        if lines.is_empty() {
            return Err(ApiError::InvalidInput("items[] is required.".to_string()));
        }
        if lines.len() > MAX_ANALYZE_BATCH {
            return Err(ApiError::InvalidInput(format!(
                "Maximum {MAX_ANALYZE_BATCH} items per batch."
            )));
        }

        self.with_conn("analyze_items", |conn| {
            resolve_list(&list_service(conn), share_token)?;
            Ok(self.item_service(conn).analyze_batch(lines.as_slice()))
        })
    }

    /// Applies a user correction to an item of the list.
    ///
    /// The correction also updates the shared cache for the item's
    /// normalized text.
    pub fn correct_item(
        &self,
        share_token: &str,
        item_id: ItemId,
        category: &str,
        emoji: &str,
    ) -> ApiResult<ItemRecord> {
        let category = category
            .trim()
            .parse::<GroceryCategory>()
            .map_err(|_| ApiError::InvalidInput("Unknown category.".to_string()))?;
        let emoji = required_text(emoji, "emoji is required.")?;

        self.with_conn("correct_item", |conn| {
            let lists = list_service(conn);
            let list = resolve_list(&lists, share_token)?;
            let items = self.item_service(conn);
            let item = items.get_item(item_id)?.ok_or(ApiError::NotFound("item"))?;
            // Item must live in one of this list's notes.
            resolve_note(&lists, &list, item.note_id).map_err(|err| match err {
                ApiError::NotFound(_) => ApiError::NotFound("item"),
                other => other,
            })?;
            Ok(items.correct_item(item.id, category, emoji)?)
        })
    }

    /// Loads the list, its notes and the items of its first note.
    pub fn list_view(&self, share_token: &str) -> ApiResult<ListView> {
        self.with_conn("list_view", |conn| {
            let lists = list_service(conn);
            let list = resolve_list(&lists, share_token)?;
            let notes = lists.list_notes(list.id)?;
            let first_note_id = notes.first().map(|note| note.id);
            let items = match first_note_id {
                Some(note_id) => self.item_service(conn).list_items(note_id)?,
                None => Vec::new(),
            };
            Ok(ListView {
                list,
                notes,
                first_note_id,
                items,
            })
        })
    }

    fn item_service<'conn>(&self, conn: &'conn Connection) -> SqliteItemService<'conn> {
        ItemService::new(SqliteItemRepository::new(conn), self.analyzer.clone())
    }

    fn with_conn<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&Connection) -> ApiResult<T>,
    ) -> ApiResult<T> {
        let guard = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        let conn: &Connection = &guard;
        let result = f(conn);
        match &result {
            Ok(_) => {}
            Err(ApiError::Internal(message)) => error!(
                "event=api_call module=api status=error operation={operation} error_code=internal error={message}"
            ),
            Err(err @ (ApiError::InvalidInput(_) | ApiError::NotFound(_))) => warn!(
                "event=api_call module=api status=rejected operation={operation} error={err}"
            ),
        }
        result
    }
}

fn list_service(conn: &Connection) -> SqliteListService<'_> {
    ListService::new(
        SqliteListRepository::new(conn),
        SqliteNoteRepository::new(conn),
    )
}

fn resolve_list(lists: &SqliteListService<'_>, share_token: &str) -> ApiResult<ListRecord> {
    let token = share_token.trim();
    if token.chars().count() < MIN_SHARE_TOKEN_LEN {
        return Err(ApiError::InvalidInput("Invalid share token.".to_string()));
    }
    lists
        .get_list_by_token(token)?
        .ok_or(ApiError::NotFound("list"))
}

fn resolve_note(
    lists: &SqliteListService<'_>,
    list: &ListRecord,
    note_id: NoteId,
) -> ApiResult<NoteRecord> {
    lists
        .get_note(note_id)?
        .filter(|note| note.list_id == list.id)
        .ok_or(ApiError::NotFound("note"))
}

fn resolve_item_in_note(
    items: &SqliteItemService<'_>,
    note: &NoteRecord,
    item_id: ItemId,
) -> ApiResult<ItemRecord> {
    items
        .get_item(item_id)?
        .filter(|item| item.note_id == note.id)
        .ok_or(ApiError::NotFound("item"))
}

fn required_text<'a>(value: &'a str, message: &str) -> ApiResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(message.to_string()));
    }
    Ok(trimmed)
}
