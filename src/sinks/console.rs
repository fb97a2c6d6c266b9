//! Console sink implementation

use crate::core::{Result, Sink};
use std::io::Write;

/// Stream the console sink writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Stream {
    #[default]
    Stdout,
    Stderr,
}

/// Sink writing serialized records to a standard stream, one per line.
pub struct ConsoleSink {
    name: String,
    stream: Stream,
}

impl ConsoleSink {
    /// Console sink on stdout.
    pub fn new() -> Self {
        Self {
            name: "console".to_string(),
            stream: Stream::Stdout,
        }
    }

    /// Console sink on stderr.
    pub fn stderr() -> Self {
        Self {
            name: "console".to_string(),
            stream: Stream::Stderr,
        }
    }

    /// Console sink with a custom name, on stdout.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stream: Stream::Stdout,
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, serialized: &str) -> Result<()> {
        match self.stream {
            Stream::Stdout => writeln!(std::io::stdout(), "{}", serialized)?,
            Stream::Stderr => writeln!(std::io::stderr(), "{}", serialized)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.stream {
            Stream::Stdout => std::io::stdout().flush()?,
            Stream::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        // The process owns the standard streams; flushing is all we do.
        self.flush()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
