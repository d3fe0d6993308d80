//! Per-user serialization

use std::sync::{Arc, Mutex};

use ahash::AHashMap;

use crate::core::error::{CampusError, Result};
use crate::core::types::UserId;

/// One mutex per user, held only while some caller needs it
///
/// Operations on the same user run one at a time; different users never
/// contend beyond the brief registry lookup. An entry is removed once its
/// last caller finishes, so the registry tracks in-flight users only.
#[derive(Default)]
pub struct UserLocks {
    locks: Mutex<AHashMap<UserId, Arc<Mutex<()>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, user: UserId) -> Result<Arc<Mutex<()>>> {
        let mut locks = self.locks.lock().map_err(|_| CampusError::LockPoisoned)?;
        Ok(Arc::clone(locks.entry(user).or_default()))
    }

    /// Drop the registry entry if the map and `lock` are its only holders
    fn release(&self, user: UserId, lock: &Arc<Mutex<()>>) {
        // Clones are only handed out under the registry lock, so the count is stable here
        if let Ok(mut locks) = self.locks.lock() {
            if Arc::strong_count(lock) == 2 {
                locks.remove(&user);
            }
        }
    }

    /// Run `f` while holding the user's lock
    pub fn with_user<T>(&self, user: UserId, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let lock = self.lock_for(user)?;
        let result = lock
            .lock()
            .map_err(|_| CampusError::LockPoisoned)
            .and_then(|_guard| f());
        self.release(user, &lock);
        result
    }

    /// Number of users with an operation in flight
    pub fn len(&self) -> usize {
        self.locks.lock().map(|locks| locks.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
