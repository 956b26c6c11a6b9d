//! Read side of an index.

use crate::error::{IndexError, Result};
use crate::query_key::build_query_key;
use csvdex_store::{StorageBackend, StorageBackendAsync};
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::Arc;

/// Cheap-to-clone lookup handle over a loaded store.
///
/// Lookups are read-only and may run concurrently. Running them while a load
/// is still writing to the same store gives no isolation.
#[derive(Clone)]
pub struct IndexReader {
    backend: Arc<dyn StorageBackend>,
    searchable_columns: Arc<[String]>,
}

impl IndexReader {
    pub fn new(backend: Arc<dyn StorageBackend>, searchable_columns: Vec<String>) -> Self {
        Self {
            backend,
            searchable_columns: searchable_columns.into(),
        }
    }

    pub fn searchable_columns(&self) -> &[String] {
        &self.searchable_columns
    }

    /// Crate version reported by the `/version` endpoint.
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Composite key for a query, or `UngroundedQuery` if no searchable
    /// column was given.
    pub fn query_key<S: BuildHasher>(&self, params: &HashMap<String, String, S>) -> Result<String> {
        build_query_key(&self.searchable_columns, params).ok_or_else(|| {
            IndexError::UngroundedQuery {
                searchable: self.searchable_columns.to_vec(),
            }
        })
    }

    /// Stored row for `key`; `None` is a plain miss.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.backend.get(key.as_bytes())?)
    }

    pub async fn get_async(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.backend.get_async(key.as_bytes()).await?)
    }

    /// Build the key for `params` and fetch it.
    pub fn lookup<S: BuildHasher>(
        &self,
        params: &HashMap<String, String, S>,
    ) -> Result<Option<Vec<u8>>> {
        let key = self.query_key(params)?;
        self.get(&key)
    }
}
