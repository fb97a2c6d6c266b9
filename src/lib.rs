//! # Chapterlog
//!
//! A structured JSON logging library with a fluent builder API,
//! per-thread ambient context, and chapter-based narrative logging.
//!
//! ## Features
//!
//! - **Fluent API**: immutable, chainable event builders
//! - **Ambient Context**: per-thread context and tags merged into every record
//! - **Chapters**: one start and one timed summary record bracketing a unit of work
//! - **Pluggable Sinks**: console, null, and custom output destinations
//!
//! ## Example
//!
//! ```
//! use chapterlog::prelude::*;
//!
//! let registry = LoggerRegistry::new(
//!     Config::builder().min_level(Level::Debug).sink(NullSink::new()).build(),
//! );
//!
//! registry
//!     .info()
//!     .message("User {0} logged in")
//!     .arg("alice")
//!     .context("userId", "12345")
//!     .tag("security", "auth")
//!     .log()
//!     .unwrap();
//!
//! let mut chapter = registry.info().begin_chapter("payment-processing");
//! chapter.record("validation", "passed").unwrap();
//! chapter.close();
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        interpolate, Chapter, Config, ConfigBuilder, FieldValue, FluentBuilder, Level, LogRecord,
        Logger, LoggerError, LoggerRegistry, Result, Sink, Step, ThreadContext, Timezone,
        DEFAULT_LOGGER_NAME,
    };
    pub use crate::sinks::{ConsoleSink, NullSink};
}

pub use crate::core::{
    interpolate, Chapter, Config, ConfigBuilder, FieldValue, FluentBuilder, JsonSerializer, Level,
    LogRecord, Logger, LoggerError, LoggerRegistry, Result, Sink, Step, ThreadContext, Timezone,
    DEFAULT_LOGGER_NAME,
};
pub use crate::sinks::{ConsoleSink, NullSink};
