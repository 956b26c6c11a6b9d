//! Test utilities for csvdex-store.
//!
//! Provides a throwaway RocksDB instance and an in-memory backend so dependent
//! crates can test the indexing pipeline without touching a real data dir.

use crate::rocksdb_init::RocksDbInit;
use crate::storage_trait::{Operation, Result, StorageBackend, StorageError};
use rocksdb::DB;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use tempfile::TempDir;

/// Test database wrapper that automatically cleans up on drop.
pub struct TestDb {
    /// RocksDB instance
    pub db: Arc<DB>,
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
}

impl TestDb {
    /// Create a fresh, empty test database.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use csvdex_store::test_utils::TestDb;
    ///
    /// let test_db = TestDb::new().unwrap();
    /// // Use test_db.db for testing...
    /// ```
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().map_err(|e| StorageError::IoError(e.to_string()))?;
        let db = RocksDbInit::with_defaults(temp_dir.path().join("test.db")).open(true)?;
        Ok(Self { db, temp_dir })
    }
}

/// Ordered in-memory backend.
///
/// Batches are applied under a single write lock, so they are atomic with
/// respect to readers.
#[derive(Default)]
pub struct InMemoryBackend {
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every stored key, in byte order.
    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.entries
            .read()
            .map(|e| e.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl StorageBackend for InMemoryBackend {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn batch(&self, operations: Vec<Operation>) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        for op in operations {
            match op {
                Operation::Put { key, value } => {
                    entries.insert(key, value);
                }
            }
        }
        Ok(())
    }
}
