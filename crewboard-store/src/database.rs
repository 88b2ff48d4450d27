//! File-backed database: load, snapshot reads, atomic commits

use std::path::{Path, PathBuf};

use fs2::FileExt;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;

use crate::entity::Schema;
use crate::error::{Result, StoreError};

/// Durable store for one schema of tables
///
/// The whole schema persists as a single JSON document. A commit clones
/// the state, applies the staged writes, writes the file atomically, then
/// swaps the copy in - readers never observe a partially applied commit,
/// and a crash mid-write never leaves a truncated state file.
#[derive(Debug)]
pub struct Database<S> {
    state: RwLock<S>,
    path: Option<PathBuf>,
    _lock: Option<StoreLock>,
}

impl<S: Schema> Database<S> {
    /// Store backed only by memory; state is lost on drop
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(S::default()),
            path: None,
            _lock: None,
        }
    }

    /// Open (or create) the state file at `path`
    ///
    /// Takes an exclusive advisory lock on a `.lock` sibling file; a
    /// second opener fails with [`StoreError::LockBusy`]. The lock is
    /// released when the database is dropped.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let lock = StoreLock::acquire(&lock_path(&path))?;

        let state = match fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => S::default(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), "opened store");
        Ok(Self {
            state: RwLock::new(state),
            path: Some(path),
            _lock: Some(lock),
        })
    }

    /// Run `f` against a read snapshot of the state
    pub async fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let state = self.state.read().await;
        f(&state)
    }

    /// Apply `mutate` to a copy of the state, persist it, then swap it in
    ///
    /// Any error from `mutate` aborts the commit with the live state and
    /// the file untouched.
    pub(crate) async fn commit(&self, mutate: impl FnOnce(&mut S) -> Result<()>) -> Result<()> {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        mutate(&mut next)?;

        if let Some(path) = &self.path {
            let content = serde_json::to_string_pretty(&next)?;
            atomic_write(path, content.as_bytes()).await?;
            debug!(path = %path.display(), "committed store state");
        }

        *state = next;
        Ok(())
    }
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

/// RAII lock guard - releases on drop
#[derive(Debug)]
struct StoreLock {
    file: std::fs::File,
    #[allow(dead_code)]
    path: PathBuf,
}

impl StoreLock {
    fn acquire(path: &Path) -> Result<Self> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        // Non-blocking lock attempt
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self {
                file,
                path: path.to_path_buf(),
            }),
            Err(_) => Err(StoreError::LockBusy {
                path: path.display().to_string(),
            }),
        }
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    // Write to temp file in same directory
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;

    // Rename (atomic on same filesystem)
    fs::rename(&temp_path, path).await?;

    Ok(())
}
