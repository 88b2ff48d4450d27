//! Error types for the store

use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Row not found for an update or delete
    #[error("{kind} not found: {id}")]
    RowNotFound { kind: &'static str, id: String },

    /// Insert with an id that is already taken
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// Row changed since it was read through this unit of work
    #[error("{kind} was modified concurrently: {id}")]
    VersionConflict { kind: &'static str, id: String },

    /// Commit-time guard rejected the commit
    #[error("constraint violated: {message}")]
    Constraint { message: String },

    /// Lock is held by another process
    #[error("store lock busy: {path}")]
    LockBusy { path: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Query evaluation error
    #[error(transparent)]
    Query(#[from] crewboard_query::QueryError),
}

impl StoreError {
    /// Create a row not found error
    pub fn row_not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::RowNotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create a duplicate id error
    pub fn duplicate_id(kind: &'static str, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            kind,
            id: id.into(),
        }
    }

    /// Create a version conflict error
    pub fn version_conflict(kind: &'static str, id: impl Into<String>) -> Self {
        Self::VersionConflict {
            kind,
            id: id.into(),
        }
    }

    /// Create a constraint violation error
    pub fn constraint(message: impl Into<String>) -> Self {
        Self::Constraint {
            message: message.into(),
        }
    }

    /// Check if this failure came from losing a concurrent race
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateId { .. } | Self::VersionConflict { .. } | Self::Constraint { .. }
        )
    }
}
