//! Sink trait for serialized log output destinations

use super::error::Result;

/// Pluggable output destination for serialized records.
///
/// Sinks receive the final wire text of each record; they never see the
/// record itself. Implementations plug in via the configuration's sink
/// list and receive one `write` per emitted record.
pub trait Sink: Send + Sync {
    /// Write one serialized record.
    fn write(&mut self, serialized: &str) -> Result<()>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<()>;

    /// Release held resources. Further writes are implementation-defined.
    fn close(&mut self) -> Result<()>;

    /// Name identifying this sink in configuration and diagnostics.
    fn name(&self) -> &str;
}
