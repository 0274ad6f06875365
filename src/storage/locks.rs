//! Collection lock table
//!
//! One mutex per collection name, created on first use and kept for the
//! lifetime of the store.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// Lazily populated map from collection name to its write lock
///
/// ## Concurrency:
/// - `locks`: guarded by a store-wide mutex, held only for the lookup or
///   insert, never across I/O
/// - Each collection lock serializes writes and deletes in that collection
#[derive(Debug, Default)]
pub struct LockTable {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl LockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock for `collection`, inserting a fresh one on first access
    pub fn get(&self, collection: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        if let Some(lock) = locks.get(collection) {
            return Arc::clone(lock);
        }

        tracing::trace!(collection, "creating collection lock");
        let lock = Arc::new(Mutex::new(()));
        locks.insert(collection.to_string(), Arc::clone(&lock));
        lock
    }

    /// Number of collections that have a lock
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_same_name_same_lock() {
        let table = LockTable::new();
        assert!(table.is_empty());

        let a = table.get("users");
        let b = table.get("users");
        let c = table.get("orders");

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_concurrent_first_access_creates_one_lock() {
        let table = LockTable::new();

        let locks: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..16).map(|_| s.spawn(|| table.get("X"))).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(table.len(), 1);
        assert!(locks.iter().all(|l| Arc::ptr_eq(l, &locks[0])));
    }
}
