//! RocksDB implementation of the StorageBackend trait.
//!
//! All index entries live in the default column family; the index has a single
//! flat key space.

use crate::storage_trait::{Operation, Result, StorageBackend, StorageError};
use rocksdb::{WriteBatch, DB};
use std::sync::Arc;

/// RocksDB implementation of the StorageBackend trait.
///
/// ## Example
///
/// ```rust,ignore
/// use csvdex_store::{RocksDBBackend, StorageBackend};
/// use std::sync::Arc;
///
/// let db = Arc::new(DB::open_default("/tmp/people.db").unwrap());
/// let backend = RocksDBBackend::new(db);
///
/// backend.put(b"id_1", b"{\"id\":\"1\"}").unwrap();
/// assert!(backend.get(b"id_1").unwrap().is_some());
/// ```
pub struct RocksDBBackend {
    db: Arc<DB>,
}

impl RocksDBBackend {
    /// Creates a new RocksDB backend with the given database handle.
    pub fn new(db: Arc<DB>) -> Self {
        Self { db }
    }
}

impl StorageBackend for RocksDBBackend {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.db
            .get(key)
            .map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.db
            .put(key, value)
            .map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn batch(&self, operations: Vec<Operation>) -> Result<()> {
        if operations.is_empty() {
            return Ok(());
        }

        let mut batch = WriteBatch::default();
        for op in operations {
            match op {
                Operation::Put { key, value } => batch.put(key, value),
            }
        }

        self.db
            .write(batch)
            .map_err(|e| StorageError::IoError(e.to_string()))
    }
}
