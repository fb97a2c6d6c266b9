//! Immutable fluent builder for log events
//!
//! Every chain method returns a new builder copying the accumulated
//! state plus the increment, so an intermediate builder can be held and
//! branched from without the branches interfering.

use super::chapter::Chapter;
use super::context::FieldValue;
use super::error::{LoggerError, Result};
use super::log_level::Level;
use super::logger::Logger;
use super::registry::{LoggerRegistry, DEFAULT_LOGGER_NAME};
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable accumulator of one log event's description.
///
/// Obtained from a [`LoggerRegistry`] level entry point and terminated
/// with [`log`](FluentBuilder::log) or
/// [`begin_chapter`](FluentBuilder::begin_chapter).
///
/// # Example
///
/// ```
/// use chapterlog::core::{Config, LoggerRegistry};
/// use chapterlog::sinks::NullSink;
///
/// let registry = LoggerRegistry::new(Config::builder().sink(NullSink::new()).build());
///
/// let base = registry.info().message("order {0} placed").arg("A-17");
/// // Branching from `base` twice yields independent continuations.
/// base.context("warehouse", "east").log().unwrap();
/// base.context("warehouse", "west").log().unwrap();
/// ```
#[derive(Clone)]
pub struct FluentBuilder<'a> {
    registry: &'a LoggerRegistry,
    level: Level,
    message: Option<String>,
    args: Vec<FieldValue>,
    context: HashMap<String, FieldValue>,
    tags: HashMap<String, String>,
    logger_name: Option<String>,
}

impl<'a> FluentBuilder<'a> {
    pub(crate) fn new(registry: &'a LoggerRegistry, level: Level) -> Self {
        Self {
            registry,
            level,
            message: None,
            args: Vec::new(),
            context: HashMap::new(),
            tags: HashMap::new(),
            logger_name: None,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Set the message, with `{0}`, `{1}`, ... placeholders for args.
    #[must_use = "builder methods return a new value"]
    pub fn message(&self, message: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.message = Some(message.into());
        next
    }

    /// Append one interpolation argument.
    #[must_use = "builder methods return a new value"]
    pub fn arg(&self, arg: impl Into<FieldValue>) -> Self {
        let mut next = self.clone();
        next.args.push(arg.into());
        next
    }

    /// Append several interpolation arguments.
    #[must_use = "builder methods return a new value"]
    pub fn args<I, V>(&self, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        let mut next = self.clone();
        next.args.extend(args.into_iter().map(Into::into));
        next
    }

    /// Add one call-local context entry.
    #[must_use = "builder methods return a new value"]
    pub fn context(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        let mut next = self.clone();
        next.context.insert(key.into(), value.into());
        next
    }

    /// Merge a map of call-local context entries.
    #[must_use = "builder methods return a new value"]
    pub fn context_map(&self, context: HashMap<String, FieldValue>) -> Self {
        let mut next = self.clone();
        next.context.extend(context);
        next
    }

    /// Add one call-local tag.
    #[must_use = "builder methods return a new value"]
    pub fn tag(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.tags.insert(key.into(), value.into());
        next
    }

    /// Merge a map of call-local tags.
    #[must_use = "builder methods return a new value"]
    pub fn tags_map(&self, tags: HashMap<String, String>) -> Self {
        let mut next = self.clone();
        next.tags.extend(tags);
        next
    }

    /// Route the event to a specific named logger instead of the default.
    #[must_use = "builder methods return a new value"]
    pub fn logger_name(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.logger_name = Some(name.into());
        next
    }

    fn resolve_logger(&self) -> Arc<Logger> {
        let name = self.logger_name.as_deref().unwrap_or(DEFAULT_LOGGER_NAME);
        self.registry.logger(name)
    }

    /// Emit the accumulated event.
    ///
    /// Fails with [`LoggerError::MissingMessage`] when no message was
    /// set; the builder stays usable afterwards.
    pub fn log(&self) -> Result<()> {
        let message = self.message.as_deref().ok_or(LoggerError::MissingMessage)?;
        self.resolve_logger().log(
            self.level,
            message,
            self.context.clone(),
            self.tags.clone(),
            &self.args,
        );
        Ok(())
    }

    /// Open a [`Chapter`] seeded with the accumulated state.
    ///
    /// The chapter logs its start marker immediately; a message is
    /// optional here, unlike [`log`](FluentBuilder::log).
    pub fn begin_chapter(&self, name: impl Into<String>) -> Chapter {
        Chapter::open(
            name.into(),
            self.resolve_logger(),
            self.level,
            self.message.clone(),
            self.args.clone(),
            self.context.clone(),
            self.tags.clone(),
        )
    }
}
