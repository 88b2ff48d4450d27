//! Unit of work and per-entity repositories

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use crewboard_query::{QueryOptions, Sortable};

use crate::database::Database;
use crate::entity::{Schema, Stored};
use crate::error::{Result, StoreError};

type Apply<S> = Box<dyn FnOnce(&mut S) -> Result<()> + Send>;

/// Request-scoped container of staged writes, committed atomically
///
/// Reads record the version of every row they return; updates and deletes
/// staged afterwards replay those versions as expected versions, so a row
/// changed by a concurrent commit fails the whole [`save`](Self::save)
/// with [`StoreError::VersionConflict`] and nothing is applied.
///
/// Staged writes are not visible to reads within the same unit of work;
/// commands carry forward the rows they stage. Dropping the unit of work
/// without saving discards everything staged.
pub struct UnitOfWork<S> {
    db: Arc<Database<S>>,
    writes: Vec<Apply<S>>,
    read_versions: HashMap<(&'static str, String), u64>,
}

impl<S: Schema> UnitOfWork<S> {
    /// Start an empty unit of work against `db`
    pub fn new(db: Arc<Database<S>>) -> Self {
        Self {
            db,
            writes: Vec::new(),
            read_versions: HashMap::new(),
        }
    }

    /// Repository facade for one entity type
    pub fn repo<T: Stored<S>>(&mut self) -> Repo<'_, S, T> {
        Repo {
            uow: self,
            _marker: PhantomData,
        }
    }

    /// Stage a commit-time invariant check
    ///
    /// Guards run in stage order together with the writes, against the
    /// state the commit is mutating, and abort the whole commit by
    /// returning an error. Stage a guard before the write it protects.
    pub fn guard(&mut self, check: impl FnOnce(&S) -> Result<()> + Send + 'static) {
        self.writes.push(Box::new(move |state| check(state)));
    }

    /// Whether anything has been staged
    pub fn is_dirty(&self) -> bool {
        !self.writes.is_empty()
    }

    /// Commit every staged write as one atomic unit
    ///
    /// A save with nothing staged is a no-op.
    pub async fn save(self) -> Result<()> {
        let UnitOfWork { db, writes, .. } = self;
        if writes.is_empty() {
            return Ok(());
        }
        db.commit(move |state| {
            for write in writes {
                write(state)?;
            }
            Ok(())
        })
        .await
    }

    fn record_read<T: Stored<S>>(&mut self, id: &T::Id, version: u64) {
        self.read_versions.insert((T::KIND, id.to_string()), version);
    }

    fn recorded_version<T: Stored<S>>(&self, id: &T::Id) -> Option<u64> {
        self.read_versions.get(&(T::KIND, id.to_string())).copied()
    }
}

/// Typed repository over one entity table, borrowed from a unit of work
pub struct Repo<'u, S, T> {
    uow: &'u mut UnitOfWork<S>,
    _marker: PhantomData<T>,
}

impl<'u, S: Schema, T: Stored<S>> Repo<'u, S, T> {
    /// Size of the full table, ignoring any filter or paging
    pub async fn count(&self) -> usize {
        self.uow.db.read(|state| T::table(state).len()).await
    }

    /// Point lookup; absence is a normal outcome, not an error
    pub async fn get_by_id(&mut self, id: &T::Id) -> Option<T> {
        let found = self
            .uow
            .db
            .read(|state| T::table(state).get(id).map(|v| (v.row.clone(), v.version)))
            .await;
        let (row, version) = found?;
        self.uow.record_read::<T>(id, version);
        Some(row)
    }

    /// Point lookup from a raw string id
    pub async fn get_str(&mut self, id: &str) -> Option<T>
    where
        T::Id: From<String>,
    {
        let id = T::Id::from(id.to_string());
        self.get_by_id(&id).await
    }

    /// Stage an insert
    ///
    /// The commit fails with [`StoreError::DuplicateId`] when the id is
    /// already taken.
    pub fn insert(&mut self, row: T) {
        self.uow
            .writes
            .push(Box::new(move |state| T::table_mut(state).insert_new(row)));
    }

    /// Stage an update guarded by the version observed when the row was
    /// read through this unit of work
    ///
    /// Fails immediately with [`StoreError::RowNotFound`] when the row
    /// does not exist at staging time.
    pub async fn update(&mut self, row: T) -> Result<()> {
        let id = row.id();
        let expected = self.expected_version(&id).await?;
        self.uow.writes.push(Box::new(move |state| {
            T::table_mut(state).apply_update(row, expected)
        }));
        Ok(())
    }

    /// Stage a delete guarded like [`update`](Self::update)
    pub async fn delete(&mut self, row: &T) -> Result<()> {
        let id = row.id();
        let expected = self.expected_version(&id).await?;
        self.uow.writes.push(Box::new(move |state| {
            T::table_mut(state).apply_delete(&id, expected)
        }));
        Ok(())
    }

    async fn expected_version(&mut self, id: &T::Id) -> Result<u64> {
        if let Some(version) = self.uow.recorded_version::<T>(id) {
            return Ok(version);
        }
        self.uow
            .db
            .read(|state| {
                T::table(state)
                    .get(id)
                    .map(|v| v.version)
                    .ok_or_else(|| StoreError::row_not_found(T::KIND, id.to_string()))
            })
            .await
    }
}

impl<'u, S: Schema, T: Stored<S> + Sortable> Repo<'u, S, T> {
    /// Rows matching `options`, in query order
    ///
    /// The underlying table iterates in id order, so unsorted queries are
    /// still deterministic.
    pub async fn list(&mut self, options: &QueryOptions<T>) -> Result<Vec<T>> {
        let rows: Vec<(T, u64)> = self
            .uow
            .db
            .read(|state| {
                T::table(state)
                    .rows()
                    .map(|v| (v.row.clone(), v.version))
                    .collect()
            })
            .await;

        let mut out = Vec::with_capacity(rows.len());
        for (row, version) in rows {
            self.uow.record_read::<T>(&row.id(), version);
            out.push(row);
        }
        Ok(crewboard_query::evaluate(out, options)?)
    }

    /// First row matching `options`, if any
    pub async fn get(&mut self, options: &QueryOptions<T>) -> Result<Option<T>> {
        Ok(self.list(options).await?.into_iter().next())
    }
}
