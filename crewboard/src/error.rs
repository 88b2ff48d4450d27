//! Error types for crewboard commands

use std::fmt::Display;

use thiserror::Error;

use crewboard_store::StoreError;

/// Result type for crewboard commands
pub type Result<T> = std::result::Result<T, CrewboardError>;

/// Errors that can occur while executing crewboard commands
#[derive(Debug, Error)]
pub enum CrewboardError {
    /// A referenced row does not exist
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// The project already has a board
    #[error("project already has a board: {project_id}")]
    BoardExists { project_id: String },

    /// The stage is already linked to the board
    #[error("stage is already on the board: {stage_id}")]
    StageAlreadyOnBoard { stage_id: String },

    /// The stage still holds tickets and cannot be removed
    #[error("stage still has tickets: {stage_id}")]
    StageHasTickets { stage_id: String },

    /// Stage orders submitted for a reorder must form the sequence 1..=n
    #[error("stage orders must run contiguously from 1, got {found}")]
    NonContiguousOrder { found: String },

    /// A pending approval request already exists for the project and group
    #[error("approval request for group {group_id} on project {project_id} is already pending")]
    PendingRequestExists {
        project_id: String,
        group_id: String,
    },

    /// A field value failed validation
    #[error("invalid {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Storage layer failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Query option failure
    #[error(transparent)]
    Query(#[from] crewboard_query::QueryError),
}

/// Broad classification of a [`CrewboardError`].
///
/// Transports map these onto status codes without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced row does not exist
    NotFound,
    /// The command lost a race or violated a uniqueness rule
    Conflict,
    /// The input was malformed
    Validation,
    /// The store itself failed
    Storage,
}

impl CrewboardError {
    /// Create a not found error
    pub fn not_found(resource: impl Into<String>, id: impl Display) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    /// Create a board exists error
    pub fn board_exists(project_id: impl Display) -> Self {
        Self::BoardExists {
            project_id: project_id.to_string(),
        }
    }

    /// Create a stage already on board error
    pub fn stage_already_on_board(stage_id: impl Display) -> Self {
        Self::StageAlreadyOnBoard {
            stage_id: stage_id.to_string(),
        }
    }

    /// Create a stage has tickets error
    pub fn stage_has_tickets(stage_id: impl Display) -> Self {
        Self::StageHasTickets {
            stage_id: stage_id.to_string(),
        }
    }

    /// Create a non-contiguous order error
    pub fn non_contiguous_order(found: impl Into<String>) -> Self {
        Self::NonContiguousOrder {
            found: found.into(),
        }
    }

    /// Create a pending request exists error
    pub fn pending_request_exists(project_id: impl Display, group_id: impl Display) -> Self {
        Self::PendingRequestExists {
            project_id: project_id.to_string(),
            group_id: group_id.to_string(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Classify this error for transport mapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::BoardExists { .. }
            | Self::StageAlreadyOnBoard { .. }
            | Self::StageHasTickets { .. }
            | Self::PendingRequestExists { .. } => ErrorKind::Conflict,
            Self::NonContiguousOrder { .. } | Self::InvalidValue { .. } | Self::Query(_) => {
                ErrorKind::Validation
            }
            Self::Store(err) => match err {
                StoreError::RowNotFound { .. } => ErrorKind::NotFound,
                StoreError::DuplicateId { .. }
                | StoreError::VersionConflict { .. }
                | StoreError::Constraint { .. } => ErrorKind::Conflict,
                StoreError::Query(_) => ErrorKind::Validation,
                StoreError::LockBusy { .. } | StoreError::Io(_) | StoreError::Json(_) => {
                    ErrorKind::Storage
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CrewboardError::not_found("ticket", "abc123");
        assert_eq!(err.to_string(), "ticket not found: abc123");

        let err = CrewboardError::board_exists("p1");
        assert_eq!(err.to_string(), "project already has a board: p1");

        let err = CrewboardError::non_contiguous_order("[1, 3, 4]");
        assert_eq!(
            err.to_string(),
            "stage orders must run contiguously from 1, got [1, 3, 4]"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            CrewboardError::not_found("board", "b1").kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            CrewboardError::board_exists("p1").kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            CrewboardError::invalid_value("title", "must not be empty").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            CrewboardError::from(StoreError::row_not_found("ticket", "t1")).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            CrewboardError::from(StoreError::version_conflict("ticket", "t1")).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            CrewboardError::from(StoreError::constraint("one board per project")).kind(),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn test_query_errors_classify_as_validation() {
        let err = CrewboardError::from(crewboard_query::QueryError::unknown_sort_field("bogus"));
        assert_eq!(err.kind(), ErrorKind::Validation);

        let nested = CrewboardError::from(StoreError::from(
            crewboard_query::QueryError::unknown_sort_field("bogus"),
        ));
        assert_eq!(nested.kind(), ErrorKind::Validation);
    }
}
