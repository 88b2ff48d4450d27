//! Crewboard context
//!
//! The context bundles the store with the acting session. It provides
//! access, not logic: commands own all behavior and go through
//! [`CrewboardContext::begin`] to read and write rows.

use std::path::PathBuf;
use std::sync::Arc;

use crewboard_store::{Database, UnitOfWork};

use crate::error::Result;
use crate::schema::Tables;
use crate::types::UserId;

/// The user a command runs as.
#[derive(Debug, Clone)]
pub struct Session {
    user_id: UserId,
}

impl Session {
    /// Create a session for the given user
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// The acting user's id
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

/// Shared handle to a crewboard store plus the acting session.
///
/// Cloning is cheap; clones share the same underlying store.
#[derive(Debug, Clone)]
pub struct CrewboardContext {
    db: Arc<Database<Tables>>,
    session: Session,
}

impl CrewboardContext {
    /// Open the store file at `path`, creating it when absent.
    ///
    /// Holds an exclusive lock on the file for the lifetime of the context,
    /// so a second process opening the same path fails with
    /// [`StoreError::LockBusy`](crewboard_store::StoreError::LockBusy).
    pub async fn open(path: impl Into<PathBuf>, session: Session) -> Result<Self> {
        let db = Database::open(path).await?;
        Ok(Self {
            db: Arc::new(db),
            session,
        })
    }

    /// Create a context over an in-memory store that is never persisted
    pub fn in_memory(session: Session) -> Self {
        Self {
            db: Arc::new(Database::in_memory()),
            session,
        }
    }

    /// Same store, acting as a different user
    pub fn with_session(&self, session: Session) -> Self {
        Self {
            db: Arc::clone(&self.db),
            session,
        }
    }

    /// The acting session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The acting user's id
    pub fn user_id(&self) -> &UserId {
        self.session.user_id()
    }

    /// Start a unit of work over the store
    pub fn begin(&self) -> UnitOfWork<Tables> {
        UnitOfWork::new(Arc::clone(&self.db))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_session_shares_the_store() {
        let ctx = CrewboardContext::in_memory(Session::new(UserId::new()));
        let other = UserId::new();

        let reseated = ctx.with_session(Session::new(other.clone()));

        assert_eq!(reseated.user_id(), &other);
        assert!(Arc::ptr_eq(&ctx.db, &reseated.db));
    }
}
