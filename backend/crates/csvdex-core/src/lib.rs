//! # csvdex-core
//!
//! Turns a CSV file into a key-value index that can be queried by
//! combinations of searchable columns.
//!
//! ```text
//! RowSource ──rows──▶ key_expander ──(key, row)──▶ BatchWriter ──batches──▶ StorageBackend
//!                                                                               ▲
//! query params ──▶ query_key ──key──▶ IndexReader ──get─────────────────────────┘
//! ```
//!
//! Every key derived from a row maps to the full JSON-encoded row, so one row
//! is stored many times over. That is what makes every lookup a single `get`.

pub mod batch_writer;
pub mod config;
pub mod error;
pub mod index_builder;
pub mod key_expander;
pub mod query_key;
pub mod reader;
pub mod row;
pub mod row_source;

#[cfg(test)]
mod test_support;

pub use batch_writer::{BatchStats, BatchWriter, DEFAULT_BATCH_SIZE};
pub use config::IndexConfig;
pub use error::{IndexError, Result};
pub use index_builder::{IndexBuilder, LoadSummary, LoadedIndex};
pub use key_expander::{effective_columns, expand_effective, expand_keys, KEY_SEPARATOR};
pub use query_key::build_query_key;
pub use reader::IndexReader;
pub use row::Row;
pub use row_source::{CsvRowSource, RowSource, VecRowSource};
