//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and the classification pipeline into
//!   use-case level APIs.
//! - Keep the boundary API decoupled from storage details.
//!
//! # Invariants
//! - Every write is followed by a read-back; a missing read-back is reported
//!   as `InconsistentState`, never silently ignored.

use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod item_service;
pub mod list_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for list, note and item use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Target record does not exist.
    NotFound { entity: &'static str, id: Uuid },
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Repo(other),
        }
    }
}
