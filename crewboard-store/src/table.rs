//! Versioned rows and id-ordered tables

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{Result, StoreError};

/// A row plus its optimistic-concurrency version
///
/// The version starts at 1 and increments on every committed update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub row: T,
    pub version: u64,
}

impl<T> Versioned<T> {
    pub fn new(row: T) -> Self {
        Self { row, version: 1 }
    }
}

/// Id-ordered rows of one entity type
///
/// Backed by a `BTreeMap`, so iteration order is id order - the stable
/// default ordering list queries rely on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent, bound = "T: Entity")]
pub struct Table<T: Entity> {
    rows: BTreeMap<T::Id, Versioned<T>>,
}

impl<T: Entity> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<T: Entity> Table<T> {
    pub fn get(&self, id: &T::Id) -> Option<&Versioned<T>> {
        self.rows.get(id)
    }

    /// Versioned rows in id order
    pub fn rows(&self) -> impl Iterator<Item = &Versioned<T>> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn insert_new(&mut self, row: T) -> Result<()> {
        let id = row.id();
        if self.rows.contains_key(&id) {
            return Err(StoreError::duplicate_id(T::KIND, id.to_string()));
        }
        self.rows.insert(id, Versioned::new(row));
        Ok(())
    }

    pub(crate) fn apply_update(&mut self, row: T, expected: u64) -> Result<()> {
        let id = row.id();
        let slot = self
            .rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::row_not_found(T::KIND, id.to_string()))?;
        if slot.version != expected {
            return Err(StoreError::version_conflict(T::KIND, id.to_string()));
        }
        slot.row = row;
        slot.version += 1;
        Ok(())
    }

    pub(crate) fn apply_delete(&mut self, id: &T::Id, expected: u64) -> Result<()> {
        let slot = self
            .rows
            .get(id)
            .ok_or_else(|| StoreError::row_not_found(T::KIND, id.to_string()))?;
        if slot.version != expected {
            return Err(StoreError::version_conflict(T::KIND, id.to_string()));
        }
        self.rows.remove(id);
        Ok(())
    }
}
