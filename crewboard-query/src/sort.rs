//! Sort keys and the Sortable trait

use chrono::{DateTime, Utc};

/// A typed, orderable key extracted from one row
///
/// One sort field always yields the same variant across rows of a given
/// entity type, so cross-variant comparisons do not occur in practice;
/// the derived order keeps them total anyway.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Bool(bool),
    Int(i64),
    Text(String),
    Time(DateTime<Utc>),
}

impl From<bool> for SortKey {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for SortKey {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for SortKey {
    fn from(value: u32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for SortKey {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value)
    }
}

/// Exposes an entity's sortable fields to the query engine
///
/// Field names are the serde field names callers already see in JSON
/// payloads. `sort_key` returns `None` when the field is unset on this
/// row (an empty assignee, say); unset keys sort before set ones when
/// ascending.
pub trait Sortable {
    /// Field names accepted in [`Sort::field`](crate::Sort)
    fn sort_fields() -> &'static [&'static str];

    /// The key for `field` on this row, or `None` when unset
    fn sort_key(&self, field: &str) -> Option<SortKey>;
}
