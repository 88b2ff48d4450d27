//! Error types for query evaluation

use thiserror::Error;

/// Result type for query evaluation
pub type Result<T> = std::result::Result<T, QueryError>;

/// Errors that can occur while evaluating query options
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Sort field is not in the entity's sortable set
    #[error("unknown sort field: {field}")]
    UnknownSortField { field: String },

    /// Sort direction string is neither "asc" nor "desc"
    #[error("invalid sort direction: {value}")]
    InvalidDirection { value: String },
}

impl QueryError {
    /// Create an unknown sort field error
    pub fn unknown_sort_field(field: impl Into<String>) -> Self {
        Self::UnknownSortField {
            field: field.into(),
        }
    }

    /// Create an invalid direction error
    pub fn invalid_direction(value: impl Into<String>) -> Self {
        Self::InvalidDirection {
            value: value.into(),
        }
    }
}
