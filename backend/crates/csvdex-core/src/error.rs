// Error types module
use csvdex_store::StorageError;
use thiserror::Error;

/// Result type for indexing and lookup operations.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Main error type for csvdex indexing and lookups.
///
/// A lookup that finds nothing is not an error; it is `Ok(None)`.
#[derive(Error, Debug)]
pub enum IndexError {
    /// Raised before any store is touched.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Cannot open store at {location}: {source}")]
    StoreOpen {
        location: String,
        #[source]
        source: StorageError,
    },

    #[error("Batch {batch_index} ({entries} entries, first key '{first_key}') failed: {source}")]
    BatchWrite {
        batch_index: usize,
        entries: usize,
        first_key: String,
        #[source]
        source: StorageError,
    },

    #[error("Row source error: {0}")]
    RowSource(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("No searchable column in query, try with {searchable:?}")]
    UngroundedQuery { searchable: Vec<String> },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<serde_json::Error> for IndexError {
    fn from(err: serde_json::Error) -> Self {
        IndexError::Serialization(err.to_string())
    }
}

impl IndexError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, IndexError::Configuration(_))
    }
}
