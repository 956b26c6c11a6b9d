//! Test backend wrapper that records batch submissions and can inject failures.

use csvdex_store::storage_trait::{Operation, Result, StorageBackend, StorageError};
use csvdex_store::test_utils::InMemoryBackend;
use std::sync::Mutex;

/// StorageBackend wrapper that records the size of every submitted batch.
pub struct RecordingBackend {
    inner: InMemoryBackend,
    batch_sizes: Mutex<Vec<usize>>,
    fail_on_batch: Option<usize>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            inner: InMemoryBackend::new(),
            batch_sizes: Mutex::new(Vec::new()),
            fail_on_batch: None,
        }
    }

    /// Reject the batch with this zero-based submission index.
    pub fn failing_on(batch_index: usize) -> Self {
        Self {
            fail_on_batch: Some(batch_index),
            ..Self::new()
        }
    }

    /// Sizes of the batches submitted so far, including a rejected one.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batch_sizes.lock().unwrap().clone()
    }

    pub fn stored(&self) -> &InMemoryBackend {
        &self.inner
    }
}

impl StorageBackend for RecordingBackend {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.inner.get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.inner.put(key, value)
    }

    fn batch(&self, operations: Vec<Operation>) -> Result<()> {
        let index = {
            let mut sizes = self.batch_sizes.lock().unwrap();
            sizes.push(operations.len());
            sizes.len() - 1
        };
        if self.fail_on_batch == Some(index) {
            return Err(StorageError::IoError("injected batch failure".to_string()));
        }
        self.inner.batch(operations)
    }
}
