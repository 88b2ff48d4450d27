//! Schema-parameterized durable store with unit-of-work commits
//!
//! One [`Database`] holds a whole [`Schema`] of [`Table`]s and persists it
//! as a single JSON document, written atomically (temp file + rename) and
//! guarded by an advisory file lock. All mutation goes through a
//! [`UnitOfWork`]: a command reads and stages writes via typed [`Repo`]
//! facades, then commits everything at once with `save()`.
//!
//! Concurrency is optimistic. Every row carries a version; reads record
//! it, and updates or deletes staged afterwards replay it as the expected
//! version at commit. The losing side of a race gets
//! [`StoreError::VersionConflict`] and none of its writes apply.
//!
//! ## Basic usage
//!
//! ```rust,ignore
//! let db = Arc::new(Database::<MySchema>::open("state.json").await?);
//!
//! let mut uow = UnitOfWork::new(Arc::clone(&db));
//! let row = uow.repo::<MyEntity>().get_by_id(&id).await;
//! uow.repo::<MyEntity>().insert(new_row);
//! uow.save().await?;
//! ```

mod database;
mod entity;
mod error;
mod table;
mod unit_of_work;

pub use database::Database;
pub use entity::{Entity, Schema, Stored};
pub use error::{Result, StoreError};
pub use table::{Table, Versioned};
pub use unit_of_work::{Repo, UnitOfWork};

#[cfg(test)]
pub(crate) mod testing;
