//! RocksDB initialization utilities.
//!
//! Opens (and optionally purges) the RocksDB instance that holds one index.

use crate::storage_trait::{Result, StorageError};
use rocksdb::{BlockBasedOptions, Cache, Options, DB};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// RocksDB-specific settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocksDbSettings {
    /// Write buffer size in bytes (default: 64MB)
    #[serde(default = "default_rocksdb_write_buffer_size")]
    pub write_buffer_size: usize,

    /// Maximum number of write buffers (default: 3)
    #[serde(default = "default_rocksdb_max_write_buffers")]
    pub max_write_buffers: i32,

    /// Block cache size for reads in bytes (default: 64MB)
    #[serde(default = "default_rocksdb_block_cache_size")]
    pub block_cache_size: usize,

    /// Maximum number of background jobs (default: 4)
    #[serde(default = "default_rocksdb_max_background_jobs")]
    pub max_background_jobs: i32,
}

impl Default for RocksDbSettings {
    fn default() -> Self {
        Self {
            write_buffer_size: default_rocksdb_write_buffer_size(),
            max_write_buffers: default_rocksdb_max_write_buffers(),
            block_cache_size: default_rocksdb_block_cache_size(),
            max_background_jobs: default_rocksdb_max_background_jobs(),
        }
    }
}

fn default_rocksdb_write_buffer_size() -> usize {
    64 * 1024 * 1024
}

fn default_rocksdb_max_write_buffers() -> i32 {
    3
}

fn default_rocksdb_block_cache_size() -> usize {
    64 * 1024 * 1024
}

fn default_rocksdb_max_background_jobs() -> i32 {
    4
}

/// RocksDB initializer for creating, purging, or reopening an index store.
pub struct RocksDbInit {
    db_path: PathBuf,
    settings: RocksDbSettings,
}

impl RocksDbInit {
    /// Create a new initializer for the given path with custom settings.
    pub fn new(db_path: impl Into<PathBuf>, settings: RocksDbSettings) -> Self {
        Self {
            db_path: db_path.into(),
            settings,
        }
    }

    /// Create a new initializer with default settings.
    pub fn with_defaults(db_path: impl Into<PathBuf>) -> Self {
        Self::new(db_path, RocksDbSettings::default())
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Open or create the RocksDB database.
    ///
    /// With `purge` set, any database already at the location is destroyed
    /// first. Without it the existing data is kept and new writes land on top.
    pub fn open(&self, purge: bool) -> Result<Arc<DB>> {
        let path = self.db_path.as_path();
        let db_opts = self.db_options();

        if purge && path.exists() {
            log::info!("Purging existing store at {}", path.display());
            DB::destroy(&db_opts, path).map_err(|e| {
                StorageError::OpenFailed(format!("cannot purge {}: {}", path.display(), e))
            })?;
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StorageError::OpenFailed(format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
        }

        let start = std::time::Instant::now();
        let db = DB::open(&db_opts, path)
            .map_err(|e| StorageError::OpenFailed(format!("{}: {}", path.display(), e)))?;
        log::debug!(
            "RocksDB opened at {} ({:.2}ms)",
            path.display(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(Arc::new(db))
    }

    fn db_options(&self) -> Options {
        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);

        db_opts.set_write_buffer_size(self.settings.write_buffer_size);
        db_opts.set_max_write_buffer_number(self.settings.max_write_buffers);
        db_opts.set_max_background_jobs(self.settings.max_background_jobs);
        db_opts.increase_parallelism(self.settings.max_background_jobs);

        // Lookups are exact-key only
        let cache = Cache::new_lru_cache(self.settings.block_cache_size);
        let block_opts = create_block_options_with_cache(&cache);
        db_opts.set_block_based_table_factory(&block_opts);
        db_opts.optimize_for_point_lookup(block_cache_size_mb(self.settings.block_cache_size));

        db_opts
    }
}

fn block_cache_size_mb(bytes: usize) -> u64 {
    std::cmp::max(1, (bytes / (1024 * 1024)) as u64)
}

pub(crate) fn create_block_options_with_cache(cache: &Cache) -> BlockBasedOptions {
    let mut block_opts = BlockBasedOptions::default();
    block_opts.set_block_cache(cache);
    block_opts.set_bloom_filter(10.0, false);
    block_opts.set_cache_index_and_filter_blocks(true);
    block_opts.set_whole_key_filtering(true);
    block_opts
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_missing_parent() {
        let temp = TempDir::new().unwrap();
        let location = temp.path().join("nested").join("people.db");

        let db = RocksDbInit::with_defaults(&location).open(true).unwrap();
        db.put(b"id_1", b"x").unwrap();

        assert!(location.exists());
    }

    #[test]
    fn test_purge_discards_previous_data() {
        let temp = TempDir::new().unwrap();
        let location = temp.path().join("people.db");
        let init = RocksDbInit::with_defaults(&location);

        {
            let db = init.open(true).unwrap();
            db.put(b"id_1", b"old").unwrap();
        }

        let db = init.open(true).unwrap();
        assert_eq!(db.get(b"id_1").unwrap(), None);
    }

    #[test]
    fn test_reopen_without_purge_keeps_data() {
        let temp = TempDir::new().unwrap();
        let location = temp.path().join("people.db");
        let init = RocksDbInit::with_defaults(&location);

        {
            let db = init.open(true).unwrap();
            db.put(b"id_1", b"old").unwrap();
        }

        let db = init.open(false).unwrap();
        assert_eq!(db.get(b"id_1").unwrap(), Some(b"old".to_vec()));
    }

    #[test]
    fn test_open_fails_when_location_is_a_file() {
        let temp = TempDir::new().unwrap();
        let location = temp.path().join("not_a_dir.db");
        std::fs::write(&location, b"plain file").unwrap();

        let err = RocksDbInit::with_defaults(&location).open(false).unwrap_err();
        assert!(matches!(err, StorageError::OpenFailed(_)));
    }
}
