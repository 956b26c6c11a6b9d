//! Index load configuration.

use crate::batch_writer::DEFAULT_BATCH_SIZE;
use crate::error::{IndexError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to load and where.
///
/// Deserialized from the `[index]` table of the server config:
///
/// ```toml
/// [index]
/// store = "people"
/// searchable_columns = ["id", "city"]
/// # columns = ["id", "name", "city"]   # omit to read the CSV header
/// purge = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Store name; the store lives at `<data_dir>/<store>.db`.
    #[serde(default)]
    pub store: String,

    /// Explicit column names. When set, every CSV line is data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,

    /// Columns to index. Must be present; an empty list means every column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub searchable_columns: Option<Vec<String>>,

    /// Destroy an existing store before loading. When false, new entries are
    /// written on top of whatever the store already holds.
    #[serde(default = "default_true")]
    pub purge: bool,

    /// Entries per atomic batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_true() -> bool {
    true
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            store: String::new(),
            columns: None,
            searchable_columns: None,
            purge: default_true(),
            batch_size: default_batch_size(),
        }
    }
}

impl IndexConfig {
    pub fn new(store: impl Into<String>, searchable_columns: Vec<String>) -> Self {
        Self {
            store: store.into(),
            searchable_columns: Some(searchable_columns),
            ..Self::default()
        }
    }

    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn with_purge(mut self, purge: bool) -> Self {
        self.purge = purge;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Check everything that can be checked without I/O.
    ///
    /// Returns the configured searchable columns (possibly empty).
    pub fn validate(&self) -> Result<&[String]> {
        if self.store.trim().is_empty() {
            return Err(IndexError::Configuration(
                "store name not specified".to_string(),
            ));
        }

        if self.batch_size == 0 {
            return Err(IndexError::Configuration(
                "batch_size cannot be 0".to_string(),
            ));
        }

        if let Some(columns) = &self.columns {
            if columns.is_empty() {
                return Err(IndexError::Configuration(
                    "columns, when given, cannot be empty".to_string(),
                ));
            }
        }

        self.searchable_columns.as_deref().ok_or_else(|| {
            IndexError::Configuration(
                "please specify at least one column to make it searchable".to_string(),
            )
        })
    }

    /// Store location under `data_dir`.
    pub fn location(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(format!("{}.db", self.store.trim()))
    }
}
