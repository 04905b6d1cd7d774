//! # In-Memory Store
//!
//! Holds the collection behind a mutex. Each `load` hands out a copy, so
//! callers see the same read-modify-write semantics as the file store.

use std::io;
use std::sync::Mutex;

use super::backend::RecordStore;
use super::collection::{Collection, Layout, Record};
use super::errors::{StorageError, StorageResult};

/// Record store that never touches disk
#[derive(Debug)]
pub struct MemoryStore<T> {
    collection: Mutex<Collection<T>>,
}

impl<T: Record> MemoryStore<T> {
    /// Create an empty list-layout store
    pub fn new() -> Self {
        Self::with_collection(Collection::new(Layout::List))
    }

    /// Create a store seeded with a collection
    pub fn with_collection(collection: Collection<T>) -> Self {
        Self {
            collection: Mutex::new(collection),
        }
    }

    /// Create a list-layout store seeded with records
    pub fn with_records(records: Vec<T>) -> Self {
        Self::with_collection(Collection::from_records(records))
    }
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> RecordStore<T> for MemoryStore<T> {
    fn load(&self) -> StorageResult<Collection<T>> {
        let guard = self
            .collection
            .lock()
            .map_err(|_| StorageError::io_error("memory store unavailable", poisoned()))?;
        Ok(guard.clone())
    }

    fn save(&self, collection: &Collection<T>) -> StorageResult<()> {
        let mut guard = self
            .collection
            .lock()
            .map_err(|_| StorageError::write_failed("memory store unavailable", poisoned()))?;
        *guard = collection.clone();
        Ok(())
    }
}

fn poisoned() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "lock poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: u32,
    }

    impl Record for Item {
        fn record_key(&self) -> String {
            self.id.to_string()
        }
    }

    #[test]
    fn test_load_returns_copy() {
        let store = MemoryStore::with_records(vec![Item { id: 1 }]);

        let mut loaded = store.load().unwrap();
        loaded.push(Item { id: 2 });

        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_save_replaces_collection() {
        let store: MemoryStore<Item> = MemoryStore::new();

        store
            .save(&Collection::from_records(vec![Item { id: 5 }]))
            .unwrap();

        assert!(store.load().unwrap().get("5").is_some());
    }
}
