//! Per-session serialization of roster commands.
//!
//! Commands on the same class session run one at a time; commands on
//! different sessions run in parallel. Cross-process races are caught by
//! the repository's version check instead.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::foundation::ClassSessionId;

#[derive(Debug, Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<ClassSessionId, Arc<AsyncMutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `id`. Released when the guard drops.
    pub async fn acquire(&self, id: ClassSessionId) -> SessionGuard<'_> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(id).or_default())
        };
        SessionGuard {
            locks: self,
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Number of sessions currently locked or waited on.
    pub fn tracked(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Drops every entry nobody holds or waits for, including ones left
    /// behind by canceled `acquire` calls.
    fn prune(&self) {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}

/// Exclusive access to one class session.
pub struct SessionGuard<'a> {
    locks: &'a SessionLocks,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        // The owned guard keeps a reference to the entry; drop it first.
        self.guard.take();
        self.locks.prune();
    }
}
