//! Sink implementations

pub mod console;
pub mod null;

pub use console::ConsoleSink;
pub use null::NullSink;

// Re-export the trait alongside its implementations
pub use crate::core::Sink;
