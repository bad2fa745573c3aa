//! Domain model for shared grocery lists.
//!
//! # Responsibility
//! - Define the category taxonomy and the item/list/note records used by
//!   the pipeline, storage and API layers.
//!
//! # Invariants
//! - Every list, note and item is identified by a stable UUID.
//! - Items carry their own copy of a category assignment.

pub mod category;
pub mod item;
pub mod list;
