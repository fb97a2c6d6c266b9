//! Null sink implementation

use crate::core::{Result, Sink};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Sink that discards every record.
///
/// Counts discarded writes so tests and benchmarks can observe that
/// delivery happened without capturing output.
pub struct NullSink {
    name: String,
    discarded: Arc<AtomicU64>,
}

impl NullSink {
    pub fn new() -> Self {
        Self::named("null")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            discarded: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Shared counter of discarded records.
    pub fn counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.discarded)
    }

    /// Number of records discarded so far.
    pub fn discarded(&self) -> u64 {
        self.discarded.load(Ordering::Relaxed)
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for NullSink {
    fn write(&mut self, _serialized: &str) -> Result<()> {
        self.discarded.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
