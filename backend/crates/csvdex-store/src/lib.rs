//! # csvdex-store
//!
//! Low-level key-value store abstraction for csvdex indexes.
//! This crate isolates all direct RocksDB interactions, allowing csvdex-core
//! to remain free of RocksDB dependencies.
//!
//! ## Architecture
//!
//! ```text
//! csvdex-core (key expansion, batching, lookups)
//!     ↓
//! csvdex-store (K/V operations)
//!     ↓
//! RocksDB (storage engine)
//! ```

pub mod rocksdb_impl;
pub mod rocksdb_init;
pub mod storage_trait;

pub use rocksdb_impl::RocksDBBackend;
pub use rocksdb_init::{RocksDbInit, RocksDbSettings};
pub use storage_trait::{Operation, StorageBackend, StorageBackendAsync, StorageError};

// Make test_utils available for testing in dependent crates
pub mod test_utils;

use std::path::Path;
use std::sync::Arc;

/// Open the RocksDB store at `location` and wrap it in a shareable backend.
pub fn open_backend(
    location: &Path,
    purge: bool,
    settings: RocksDbSettings,
) -> storage_trait::Result<Arc<dyn StorageBackend>> {
    let db = RocksDbInit::new(location, settings).open(purge)?;
    Ok(Arc::new(RocksDBBackend::new(db)))
}
