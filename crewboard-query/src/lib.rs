//! Generic filter, sort, and page evaluation over entity collections
//!
//! This crate knows nothing about any particular domain. Callers hand
//! [`evaluate`] a collection plus [`QueryOptions`] and get back the
//! filtered, sorted, paged rows:
//!
//! - **Filter** - an arbitrary predicate over the row type
//! - **Sort** - a single key named by its serde field name, ascending or
//!   descending, validated against the entity's [`Sortable`] whitelist
//! - **Page** - a 1-based window; non-positive values disable paging
//!   rather than failing
//!
//! Evaluation is pure and deterministic: the sort is stable and unsorted
//! queries preserve input order.

mod engine;
mod error;
mod options;
mod sort;

pub use engine::evaluate;
pub use error::{QueryError, Result};
pub use options::{Direction, Filter, Page, QueryOptions, Sort};
pub use sort::{SortKey, Sortable};
