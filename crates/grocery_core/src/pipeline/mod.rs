//! Item text normalization and category assignment pipeline.
//!
//! # Responsibility
//! - Normalize raw list lines into cache keys plus quantity.
//! - Classify lines through the shared assignment cache.
//! - Feed user corrections back into the cache.
//!
//! # Invariants
//! - Nothing in this module blocks or performs I/O, except loading an
//!   explicitly configured seed file.
//!
//! # Data flow
//! raw text -> `normalize` -> `cache` lookup -> `ClassifiedItem`;
//! corrections flow back into `cache`.

pub mod analyzer;
pub mod cache;
pub mod correction;
pub mod normalize;
pub mod seed;
