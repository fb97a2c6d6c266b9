//! Logger registry and fluent entry points
//!
//! The registry owns the configuration and the named loggers created
//! from it. Loggers are created on first use and cached; all loggers of
//! one registry share the same configuration and sink list.

use super::builder::FluentBuilder;
use super::config::Config;
use super::log_level::Level;
use super::logger::Logger;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Logger name used when a fluent chain never sets one explicitly.
pub const DEFAULT_LOGGER_NAME: &str = "default";

/// Registry of named loggers sharing one configuration.
///
/// # Example
///
/// ```
/// use chapterlog::core::{Config, Level, LoggerRegistry};
/// use chapterlog::sinks::NullSink;
///
/// let registry = LoggerRegistry::new(
///     Config::builder().min_level(Level::Debug).sink(NullSink::new()).build(),
/// );
///
/// registry
///     .info()
///     .message("User {0} logged in")
///     .arg("alice")
///     .context("userId", "12345")
///     .tag("security", "auth")
///     .log()
///     .unwrap();
/// ```
pub struct LoggerRegistry {
    config: Arc<Config>,
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
}

impl LoggerRegistry {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            loggers: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get or create the logger with the given name.
    pub fn logger(&self, name: &str) -> Arc<Logger> {
        if let Some(logger) = self.loggers.read().get(name) {
            return Arc::clone(logger);
        }

        let mut loggers = self.loggers.write();
        let logger = loggers
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Logger::new(name, Arc::clone(&self.config))));
        Arc::clone(logger)
    }

    /// Start a fluent chain at an arbitrary level.
    pub fn at(&self, level: Level) -> FluentBuilder<'_> {
        FluentBuilder::new(self, level)
    }

    /// Start a trace-level fluent chain.
    pub fn trace(&self) -> FluentBuilder<'_> {
        self.at(Level::Trace)
    }

    /// Start a debug-level fluent chain.
    pub fn debug(&self) -> FluentBuilder<'_> {
        self.at(Level::Debug)
    }

    /// Start an info-level fluent chain.
    pub fn info(&self) -> FluentBuilder<'_> {
        self.at(Level::Info)
    }

    /// Start a warn-level fluent chain.
    pub fn warn(&self) -> FluentBuilder<'_> {
        self.at(Level::Warn)
    }

    /// Start an error-level fluent chain.
    pub fn error(&self) -> FluentBuilder<'_> {
        self.at(Level::Error)
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
