//! Bounded batch buffering in front of the store.
//!
//! Entries are submitted in arrival order, one atomic batch at a time, so a
//! key written by a later row always overwrites the same key from an earlier
//! row. A failed batch is reported at the `add`/`flush` call that submitted
//! it and is never retried; entries of earlier batches stay written.

use crate::error::{IndexError, Result};
use csvdex_store::{Operation, StorageBackend};

/// Entries per batch unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Counters for what actually reached the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub batches: usize,
    pub entries: usize,
}

pub struct BatchWriter<'a> {
    backend: &'a dyn StorageBackend,
    capacity: usize,
    pending: Vec<Operation>,
    stats: BatchStats,
}

impl<'a> BatchWriter<'a> {
    pub fn new(backend: &'a dyn StorageBackend, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            backend,
            capacity,
            pending: Vec::with_capacity(capacity),
            stats: BatchStats::default(),
        }
    }

    /// Buffer one entry, submitting the buffer once it reaches capacity.
    pub fn add(&mut self, key: String, value: &[u8]) -> Result<()> {
        self.pending.push(Operation::put(key, value));
        if self.pending.len() >= self.capacity {
            self.submit()?;
        }
        Ok(())
    }

    /// Entries buffered but not yet submitted.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn stats(&self) -> BatchStats {
        self.stats
    }

    /// Submit whatever is left and report the totals.
    pub fn flush(mut self) -> Result<BatchStats> {
        if !self.pending.is_empty() {
            self.submit()?;
        }
        Ok(self.stats)
    }

    fn submit(&mut self) -> Result<()> {
        let operations = std::mem::replace(&mut self.pending, Vec::with_capacity(self.capacity));
        let batch_index = self.stats.batches;
        let entries = operations.len();
        let first_key = operations
            .first()
            .map(|op| String::from_utf8_lossy(op.key()).into_owned())
            .unwrap_or_default();

        self.backend
            .batch(operations)
            .map_err(|source| IndexError::BatchWrite {
                batch_index,
                entries,
                first_key,
                source,
            })?;

        self.stats.batches += 1;
        self.stats.entries += entries;
        log::debug!("Submitted batch {} ({} entries)", batch_index, entries);
        Ok(())
    }
}
