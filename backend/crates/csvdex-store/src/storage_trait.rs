//! Storage backend abstraction for the index store.
//!
//! The indexing pipeline only needs a flat key space: point reads, single
//! writes, and atomic batches of writes. Everything engine-specific (column
//! families, compaction, on-disk layout) stays behind this trait so the core
//! crate can be exercised against an in-memory backend in tests.
//!
//! ## Example Usage
//!
//! ```rust
//! use csvdex_store::storage_trait::{Operation, StorageBackend};
//! use csvdex_store::test_utils::InMemoryBackend;
//!
//! let backend = InMemoryBackend::new();
//! backend
//!     .batch(vec![Operation::put("id_1", b"{\"id\":\"1\"}".to_vec())])
//!     .expect("batch");
//! assert!(backend.get(b"id_1").expect("get").is_some());
//! ```

use std::fmt;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Clone)]
pub enum StorageError {
    /// Store could not be created, opened or purged at its location
    OpenFailed(String),

    /// Generic I/O error from underlying storage
    IoError(String),

    /// Lock poisoning error (internal concurrency issue)
    LockPoisoned(String),

    /// Other errors
    Other(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::OpenFailed(msg) => write!(f, "Open failed: {}", msg),
            StorageError::IoError(msg) => write!(f, "I/O error: {}", msg),
            StorageError::LockPoisoned(msg) => write!(f, "Lock poisoned: {}", msg),
            StorageError::Other(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// A single write inside a batch submitted through `StorageBackend::batch()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Insert or overwrite a key-value pair
    Put { key: Vec<u8>, value: Vec<u8> },
}

impl Operation {
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Operation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Key touched by this operation.
    pub fn key(&self) -> &[u8] {
        match self {
            Operation::Put { key, .. } => key,
        }
    }
}

/// Trait for pluggable storage backend implementations.
///
/// Implementations must be thread-safe (Send + Sync) so query handlers can
/// share one handle.
///
/// ## Error Handling
///
/// Implementations should:
/// - Return `Ok(None)` from `get` for missing keys (a miss is not an error)
/// - Return `IoError` for underlying storage failures
/// - Treat an empty batch as a no-op
pub trait StorageBackend: Send + Sync {
    /// Retrieves a value by key.
    ///
    /// Returns `Ok(None)` if the key doesn't exist.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Stores a key-value pair, overwriting any previous value.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Executes multiple operations atomically in a batch.
    ///
    /// Either all operations succeed or none are applied.
    fn batch(&self, operations: Vec<Operation>) -> Result<()>;
}

/// Async read access for use inside actix handlers.
///
/// Reads go through `tokio::task::spawn_blocking` to offload
/// the synchronous store call to a blocking thread pool, preventing
/// the async runtime from being blocked.
#[async_trait::async_trait]
pub trait StorageBackendAsync: Send + Sync {
    /// Async version of `get()` - retrieves a value by key.
    async fn get_async(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;
}

// Blanket implementation for Arc<dyn StorageBackend>
#[async_trait::async_trait]
impl StorageBackendAsync for std::sync::Arc<dyn StorageBackend> {
    async fn get_async(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let backend = self.clone();
        let key = key.to_vec();
        tokio::task::spawn_blocking(move || backend.get(&key))
            .await
            .map_err(|e| StorageError::Other(format!("spawn_blocking join error: {}", e)))?
    }
}
