//! Entity, Stored, and Schema traits

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::table::Table;

/// A persistable row type
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Identifier type; ordered so tables iterate deterministically
    type Id: Clone + Ord + Display + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Lowercase noun used in error messages
    const KIND: &'static str;

    /// The row's identifier
    fn id(&self) -> Self::Id;
}

/// Locates the table holding `Self` inside a schema
///
/// Implemented once per entity per schema, giving the generic
/// [`Repo`](crate::Repo) its access path.
pub trait Stored<S>: Entity {
    fn table(schema: &S) -> &Table<Self>;
    fn table_mut(schema: &mut S) -> &mut Table<Self>;
}

/// The full set of tables persisted as one document
pub trait Schema: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static {}
