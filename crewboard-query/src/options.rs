//! Query options: filter, sort, and page knobs
//!
//! The knobs are independent. Any subset may be present; evaluation
//! applies filter, then sort, then paging.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Filter predicate applied to each row before sorting and paging
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Direction of a single-key sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(QueryError::invalid_direction(s)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Sort directive: one field name plus a direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    /// Serde field name of the sort key
    pub field: String,
    #[serde(default)]
    pub direction: Direction,
}

impl Sort {
    /// Ascending sort on `field`
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    /// Descending sort on `field`
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

/// One page of results
///
/// Paging only applies when both `number` and `size` are positive;
/// any other combination means "return everything".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number
    pub number: i64,
    /// Rows per page
    pub size: i64,
}

impl Page {
    pub fn new(number: i64, size: i64) -> Self {
        Self { number, size }
    }

    /// Whether this page actually narrows the result set
    pub fn is_active(&self) -> bool {
        self.number > 0 && self.size > 0
    }

    pub(crate) fn skip(&self) -> usize {
        ((self.number - 1) * self.size) as usize
    }

    pub(crate) fn take(&self) -> usize {
        self.size as usize
    }
}

/// Filter, sort, and page configuration for one query
pub struct QueryOptions<T> {
    /// Rows failing the predicate are dropped before sorting
    pub filter: Option<Filter<T>>,
    /// Single-key sort; `None` preserves input order
    pub sort: Option<Sort>,
    /// Page window; `None` or an inactive page returns everything
    pub page: Option<Page>,
}

impl<T> Default for QueryOptions<T> {
    fn default() -> Self {
        Self {
            filter: None,
            sort: None,
            page: None,
        }
    }
}

impl<T> QueryOptions<T> {
    /// Options that return every row in input order
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter predicate
    pub fn with_filter(mut self, filter: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Set the sort directive
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Set the page window
    pub fn with_page(mut self, number: i64, size: i64) -> Self {
        self.page = Some(Page::new(number, size));
        self
    }
}

impl<T> fmt::Debug for QueryOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryOptions")
            .field("filter", &self.filter.as_ref().map(|_| "<predicate>"))
            .field("sort", &self.sort)
            .field("page", &self.page)
            .finish()
    }
}
