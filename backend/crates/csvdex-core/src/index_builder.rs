//! Index loading: row source -> key expansion -> batched writes.

use crate::batch_writer::BatchWriter;
use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use crate::key_expander::{effective_columns, expand_effective};
use crate::reader::IndexReader;
use crate::row_source::{CsvRowSource, RowSource};
use csvdex_store::{RocksDbSettings, StorageBackend};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Outcome of a completed load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    /// Column names as resolved from config or the CSV header.
    pub columns: Vec<String>,
    /// Columns that keys were built from, in key order.
    pub searchable_columns: Vec<String>,
    pub rows: usize,
    pub keys: usize,
    pub batches: usize,
}

/// A finished load together with the open store it was written to.
pub struct LoadedIndex {
    pub summary: LoadSummary,
    pub backend: Arc<dyn StorageBackend>,
}

impl LoadedIndex {
    /// Reader over the freshly loaded store.
    pub fn reader(&self) -> IndexReader {
        IndexReader::new(
            Arc::clone(&self.backend),
            self.summary.searchable_columns.clone(),
        )
    }
}

/// Builds one index from one row source.
///
/// Holds everything a load needs; there is no process-wide state, so several
/// builders can target different stores in the same process.
pub struct IndexBuilder {
    config: IndexConfig,
    data_dir: PathBuf,
    rocksdb: RocksDbSettings,
}

impl IndexBuilder {
    pub fn new(config: IndexConfig, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            data_dir: data_dir.into(),
            rocksdb: RocksDbSettings::default(),
        }
    }

    pub fn with_rocksdb_settings(mut self, settings: RocksDbSettings) -> Self {
        self.rocksdb = settings;
        self
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Where the RocksDB store lives.
    pub fn location(&self) -> PathBuf {
        self.config.location(&self.data_dir)
    }

    /// Load a CSV file.
    ///
    /// Configuration and the CSV file are checked before the store is
    /// opened, so a bad setup never purges an existing store.
    pub fn build_from_csv(&self, csv_path: &Path) -> Result<LoadedIndex> {
        self.config.validate()?;
        let source = CsvRowSource::open(csv_path, self.config.columns.as_deref())?;
        self.build(source)
    }

    /// Open (or purge and recreate) the store and load `source` into it.
    pub fn build<S: RowSource>(&self, source: S) -> Result<LoadedIndex> {
        let searchable = self.resolve_searchable(&source)?;

        let location = self.location();
        let backend = csvdex_store::open_backend(&location, self.config.purge, self.rocksdb.clone())
            .map_err(|err| IndexError::StoreOpen {
                location: location.display().to_string(),
                source: err,
            })?;
        info!(
            "Loading index into {} (purge={}, searchable={:?})",
            location.display(),
            self.config.purge,
            searchable
        );

        let summary = load_rows(backend.as_ref(), searchable, source, self.config.batch_size)?;
        Ok(LoadedIndex { summary, backend })
    }

    /// Load `source` into an already open store. Purging is the caller's job.
    pub fn build_into<S: RowSource>(
        &self,
        backend: &dyn StorageBackend,
        source: S,
    ) -> Result<LoadSummary> {
        let searchable = self.resolve_searchable(&source)?;
        load_rows(backend, searchable, source, self.config.batch_size)
    }

    fn resolve_searchable<S: RowSource>(&self, source: &S) -> Result<Vec<String>> {
        let configured = self.config.validate()?;
        let resolved = effective_columns(configured, source.columns());
        if resolved.is_empty() {
            return Err(IndexError::Configuration(format!(
                "none of the searchable columns {:?} exist in {:?}",
                configured,
                source.columns()
            )));
        }
        Ok(resolved)
    }
}

fn load_rows<S: RowSource>(
    backend: &dyn StorageBackend,
    searchable: Vec<String>,
    mut source: S,
    batch_size: usize,
) -> Result<LoadSummary> {
    let start = Instant::now();
    let columns = source.columns().to_vec();
    let mut writer = BatchWriter::new(backend, batch_size);
    let mut rows = 0usize;
    let mut keys = 0usize;

    for row in source.by_ref() {
        let row = row?;
        let value = row.to_json_bytes()?;
        for key in expand_effective(&searchable, &row) {
            writer.add(key, &value)?;
            keys += 1;
        }
        rows += 1;
    }

    let stats = writer.flush()?;
    debug!("Load wrote {} entries in {} batches", stats.entries, stats.batches);
    info!(
        "Indexed {} rows under {} keys ({} batches) in {:.2}ms",
        rows,
        keys,
        stats.batches,
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(LoadSummary {
        columns,
        searchable_columns: searchable,
        rows,
        keys,
        batches: stats.batches,
    })
}
