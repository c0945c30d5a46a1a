//! Shared-read, exclusive-write access to an index.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::GraphError;

/// Reference-counted handle to an index guarded by a reader/writer lock.
///
/// Traversals hold a read guard for their whole duration; any number of them
/// may run at once. A background updater takes the write guard, which waits
/// for every reader to finish.
#[derive(Debug)]
pub struct SharedIndex<I> {
    inner: Arc<RwLock<I>>,
}

impl<I> Clone for SharedIndex<I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I> SharedIndex<I> {
    /// Wraps an index for sharing.
    #[must_use]
    pub fn new(index: I) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    /// Acquires shared read access.
    ///
    /// # Errors
    /// Returns [`GraphError::LockPoisoned`] if a writer panicked while
    /// holding the lock.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, I>, GraphError> {
        self.inner
            .read()
            .map_err(|_| GraphError::LockPoisoned { access: "read" })
    }

    /// Acquires exclusive write access.
    ///
    /// # Errors
    /// Returns [`GraphError::LockPoisoned`] if a previous holder panicked.
    pub fn write(&self) -> Result<RwLockWriteGuard<'_, I>, GraphError> {
        self.inner
            .write()
            .map_err(|_| GraphError::LockPoisoned { access: "write" })
    }

    /// Runs `update` with exclusive access and returns its result.
    ///
    /// # Errors
    /// Returns [`GraphError::LockPoisoned`] if the lock cannot be acquired.
    pub fn update<T>(&self, update: impl FnOnce(&mut I) -> T) -> Result<T, GraphError> {
        let mut guard = self.write()?;
        Ok(update(&mut guard))
    }
}
