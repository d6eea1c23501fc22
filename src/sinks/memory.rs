//! In-memory capturing sink
//!
//! Stores every record it receives; clones share the same backing store,
//! so a test can keep one handle and hand the other to the configuration.

use crate::core::{Record, Result, Sink};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct MemorySink {
    records: Arc<RwLock<Vec<Record>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record captured so far, in arrival order.
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        self.records.read().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    pub fn clear(&self) {
        self.records.write().clear();
    }
}

impl Sink for MemorySink {
    fn append(&mut self, record: &Record) -> Result<()> {
        self.records.write().push(record.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
