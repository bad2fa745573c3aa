//! Core domain logic for shared grocery lists.
//! Item normalization, category assignment and the correction loop live
//! here, together with list/note/item storage.

pub mod api;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod repo;
pub mod service;

pub use api::{ApiError, ApiResult, GroceryApi, ListDetails, ListView, NoteDetails};
pub use config::{ConfigError, GroceryConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{GroceryCategory, UnknownCategory, CATEGORIES};
pub use model::item::{Assignment, AssignmentSource, ClassifiedItem, ItemRecord, NormalizedItem};
pub use model::list::{ListRecord, NotePatch, NoteRecord};
pub use pipeline::analyzer::Analyzer;
pub use pipeline::cache::{AssignmentCache, SeedReport};
pub use pipeline::normalize::normalize_item;
pub use pipeline::seed::SeedError;
pub use service::list_service::CreatedList;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
