//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep endpoint layers decoupled from storage details.
//!
//! # Invariants
//! - Every operation takes the owner explicitly; services never resolve it.
//! - "Today" is passed in by the caller so views are reproducible.

pub mod assistant;
pub mod entry_service;
pub mod export_service;
pub mod progress_service;

use crate::model::entry::EntryKind;
use crate::model::{EntryId, EntryValidationError, OwnerId};
use crate::repo::entry_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case level error surfaced to endpoint layers.
#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected before any SQL ran.
    Validation(EntryValidationError),
    /// Missing entry, or an entry owned by someone else.
    NotFound { kind: EntryKind, id: EntryId },
    ProfileNotFound(OwnerId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Stable machine-readable error code for envelopes and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::NotFound { .. } | Self::ProfileNotFound(_) => "not_found",
            Self::Repo(_) => "storage_failed",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { .. } => f.write_str("Entry not found or access denied"),
            Self::ProfileNotFound(owner_id) => write!(f, "profile not found for owner {owner_id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NotFound { .. } | Self::ProfileNotFound(_) => None,
        }
    }
}

impl From<EntryValidationError> for ServiceError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound { kind, id } => Self::NotFound { kind, id },
            RepoError::ProfileNotFound(owner_id) => Self::ProfileNotFound(owner_id),
            other => Self::Repo(other),
        }
    }
}
