use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Per-collection write locks.
///
/// Locks are created on first reference and kept for the lifetime of the
/// registry. The map itself sits behind its own mutex, which is held only
/// while looking up or inserting an entry, never while a collection lock is
/// held.
#[derive(Debug, Default)]
pub struct CollectionLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl CollectionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the lock for `collection`, creating it if needed.
    pub fn get_or_create(&self, collection: &str) -> Arc<Mutex<()>> {
        // The map holds no invariant a panic could break, so a poisoned
        // guard is still usable.
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(lock) = locks.get(collection) {
            return Arc::clone(lock);
        }
        let lock = Arc::new(Mutex::new(()));
        locks.insert(collection.to_string(), Arc::clone(&lock));
        lock
    }

    /// Number of collections that have been locked at least once.
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Acquire a collection lock, ignoring poisoning (the lock guards no data).
pub fn acquire(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}
