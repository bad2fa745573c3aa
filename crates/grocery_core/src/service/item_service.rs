//! Item use-case service.
//!
//! # Responsibility
//! - Create and edit items by running raw text through the analyzer.
//! - Apply user corrections to stored items and to the shared cache.
//!
//! # Invariants
//! - An edit re-analyzes from scratch; the previous assignment and its
//!   source are not consulted.
//! - A correction bypasses the analyzer entirely.

use crate::model::category::GroceryCategory;
use crate::model::item::{Assignment, ClassifiedItem, ItemDraft, ItemId, ItemRecord};
use crate::model::list::NoteId;
use crate::pipeline::analyzer::Analyzer;
use crate::pipeline::correction;
use crate::repo::item_repo::ItemRepository;
use crate::repo::RepoResult;
use crate::service::{ServiceError, ServiceResult};

/// Item service facade over a repository and the shared analyzer.
pub struct ItemService<R: ItemRepository> {
    repo: R,
    analyzer: Analyzer,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repo: R, analyzer: Analyzer) -> Self {
        Self { repo, analyzer }
    }

    /// Classifies `raw_text` and stores it under `note_id`.
    pub fn create_item(&self, note_id: NoteId, raw_text: &str) -> ServiceResult<ItemRecord> {
        let draft = ItemDraft::new(note_id, self.analyzer.analyze_one(raw_text));
        let item_id = self.repo.create_item(&draft)?;
        self.read_back(item_id, "created item not found in read-back")
    }

    /// Replaces the item text and its classification.
    pub fn update_item(&self, item_id: ItemId, raw_text: &str) -> ServiceResult<ItemRecord> {
        let classified = self.analyzer.analyze_one(raw_text);
        self.repo.replace_item_analysis(item_id, &classified)?;
        self.read_back(item_id, "updated item not found in read-back")
    }

    pub fn get_item(&self, item_id: ItemId) -> RepoResult<Option<ItemRecord>> {
        self.repo.get_item(item_id)
    }

    pub fn list_items(&self, note_id: NoteId) -> RepoResult<Vec<ItemRecord>> {
        self.repo.list_items_for_note(note_id)
    }

    pub fn delete_item(&self, item_id: ItemId) -> ServiceResult<()> {
        self.repo.delete_item(item_id)?;
        Ok(())
    }

    /// Classifies lines without storing anything.
    pub fn analyze_batch<S: AsRef<str>>(&self, raw_texts: &[S]) -> Vec<ClassifiedItem> {
        self.analyzer.analyze_many(raw_texts)
    }

    /// Applies a user correction to one stored item.
    ///
    /// Once stored, the correction is also written to the shared cache, so
    /// later items with the same normalized text pick it up. A failed store
    /// leaves the cache untouched.
    pub fn correct_item(
        &self,
        item_id: ItemId,
        category: GroceryCategory,
        emoji: &str,
    ) -> ServiceResult<ItemRecord> {
        let item = self.repo.get_item(item_id)?.ok_or(ServiceError::NotFound {
            entity: "item",
            id: item_id,
        })?;

        self.repo
            .apply_assignment(item_id, &Assignment::correction(category, emoji))?;
        let corrected = self.read_back(item_id, "corrected item not found in read-back")?;

        // Cache only learns corrections that reached storage.
        correction::remember_correction(self.analyzer.cache(), &item, &corrected);
        Ok(corrected)
    }

    fn read_back(&self, item_id: ItemId, details: &'static str) -> ServiceResult<ItemRecord> {
        self.repo
            .get_item(item_id)?
            .ok_or(ServiceError::InconsistentState(details))
    }
}
