//! Chapter-based narrative logging
//!
//! A chapter brackets a unit of work with one start record and one
//! completion record. Steps recorded while the chapter is open are
//! folded into the completion record together with the elapsed time.

use super::context::FieldValue;
use super::error::{LoggerError, Result};
use super::log_level::Level;
use super::logger::{interpolate, Logger};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Narrative aggregator with an OPEN -> CLOSED lifecycle.
///
/// Construction (via [`FluentBuilder::begin_chapter`]) immediately emits
/// the start record. Steps, context, and tags may be added while open;
/// [`close`](Chapter::close) emits exactly one completion record
/// summarizing elapsed time and every recorded step, and is idempotent.
/// Dropping an open chapter closes it, so the completion record is
/// emitted on every exit path, including unwinding.
///
/// [`FluentBuilder::begin_chapter`]: crate::core::FluentBuilder::begin_chapter
///
/// # Example
///
/// ```
/// use chapterlog::core::{Config, LoggerRegistry};
/// use chapterlog::sinks::NullSink;
///
/// let registry = LoggerRegistry::new(Config::builder().sink(NullSink::new()).build());
///
/// let mut chapter = registry.info().begin_chapter("payment-processing");
/// chapter.record("validation", "passed").unwrap();
/// chapter.record("charge", 1999).unwrap();
/// chapter.close();
/// ```
pub struct Chapter {
    name: String,
    logger: Arc<Logger>,
    level: Level,
    start_time: DateTime<Utc>,
    start_instant: Instant,
    steps: HashMap<String, FieldValue>,
    context: HashMap<String, FieldValue>,
    tags: HashMap<String, String>,
    // Some(duration) marks the chapter closed, frozen at the close instant.
    elapsed_at_close: Option<Duration>,
}

impl std::fmt::Debug for Chapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chapter")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("start_time", &self.start_time)
            .field("steps", &self.steps)
            .field("context", &self.context)
            .field("tags", &self.tags)
            .field("elapsed_at_close", &self.elapsed_at_close)
            .finish_non_exhaustive()
    }
}

impl Chapter {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn open(
        name: String,
        logger: Arc<Logger>,
        level: Level,
        seed_message: Option<String>,
        seed_args: Vec<FieldValue>,
        context: HashMap<String, FieldValue>,
        tags: HashMap<String, String>,
    ) -> Self {
        let chapter = Self {
            name,
            logger,
            level,
            start_time: Utc::now(),
            start_instant: Instant::now(),
            steps: HashMap::new(),
            context,
            tags,
            elapsed_at_close: None,
        };
        chapter.log_start(seed_message.as_deref(), &seed_args);
        chapter
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_closed(&self) -> bool {
        self.elapsed_at_close.is_some()
    }

    /// Elapsed time since the chapter opened.
    ///
    /// While open this advances with the wall clock; once closed it is
    /// frozen at the close instant.
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at_close
            .unwrap_or_else(|| self.start_instant.elapsed())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(LoggerError::ClosedChapter(self.name.clone()))
        } else {
            Ok(())
        }
    }

    /// Record one named step. A later record for the same step name
    /// overwrites the earlier value.
    pub fn record(
        &mut self,
        step: impl Into<String>,
        data: impl Into<FieldValue>,
    ) -> Result<&mut Self> {
        self.ensure_open()?;
        self.steps.insert(step.into(), data.into());
        Ok(self)
    }

    /// Record several steps at once. Last write wins per step name.
    pub fn records(&mut self, steps: HashMap<String, FieldValue>) -> Result<&mut Self> {
        self.ensure_open()?;
        self.steps.extend(steps);
        Ok(self)
    }

    /// Add a context entry to the chapter's snapshot.
    pub fn context(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Result<&mut Self> {
        self.ensure_open()?;
        self.context.insert(key.into(), value.into());
        Ok(self)
    }

    /// Add a tag to the chapter's snapshot.
    pub fn tag(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<&mut Self> {
        self.ensure_open()?;
        self.tags.insert(key.into(), value.into());
        Ok(self)
    }

    /// Handle for recording one step with fluent sugar.
    pub fn step(&mut self, name: impl Into<String>) -> Step<'_> {
        Step {
            chapter: self,
            name: name.into(),
        }
    }

    /// Close the chapter, emitting the completion record.
    ///
    /// Idempotent: only the first call emits; later calls are no-ops.
    pub fn close(&mut self) {
        if self.is_closed() {
            return;
        }
        let elapsed = self.start_instant.elapsed();
        self.elapsed_at_close = Some(elapsed);
        self.log_end(elapsed);
    }

    fn format_instant(instant: &DateTime<Utc>) -> String {
        instant.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    fn log_start(&self, seed_message: Option<&str>, seed_args: &[FieldValue]) {
        let mut context = self.context.clone();
        context.insert("chapter.name".to_string(), self.name.as_str().into());
        context.insert("chapter.phase".to_string(), "START".into());
        context.insert(
            "chapter.start_time".to_string(),
            Self::format_instant(&self.start_time).into(),
        );
        context.insert("chapter.duration_ms".to_string(), FieldValue::Int(0));
        if let Some(message) = seed_message {
            context.insert(
                "chapter.message".to_string(),
                interpolate(message, seed_args).into(),
            );
        }

        self.logger.log(
            self.level,
            &format!("Chapter started: {}", self.name),
            context,
            self.tags.clone(),
            &[],
        );
    }

    fn log_end(&self, duration: Duration) {
        let end_time = Utc::now();

        let mut context = self.context.clone();
        context.insert("chapter.name".to_string(), self.name.as_str().into());
        context.insert("chapter.phase".to_string(), "END".into());
        context.insert(
            "chapter.start_time".to_string(),
            Self::format_instant(&self.start_time).into(),
        );
        context.insert(
            "chapter.end_time".to_string(),
            Self::format_instant(&end_time).into(),
        );
        context.insert(
            "chapter.duration_ms".to_string(),
            FieldValue::Int(duration.as_millis() as i64),
        );
        context.insert(
            "chapter.duration_ns".to_string(),
            FieldValue::Int(duration.as_nanos() as i64),
        );

        for (step, value) in &self.steps {
            context.insert(format!("chapter.step.{}", step), value.clone());
        }
        context.insert(
            "chapter.steps.count".to_string(),
            FieldValue::Int(self.steps.len() as i64),
        );
        // Sorted so the summary is deterministic regardless of map order.
        let mut step_names: Vec<String> = self.steps.keys().cloned().collect();
        step_names.sort();
        context.insert("chapter.steps".to_string(), step_names.into());
        context.insert("chapter.status".to_string(), "SUCCESS".into());

        self.logger.log(
            self.level,
            &format!(
                "Chapter completed: {} (took {}ms)",
                self.name,
                duration.as_millis()
            ),
            context,
            self.tags.clone(),
            &[],
        );
    }
}

impl Drop for Chapter {
    fn drop(&mut self) {
        self.close();
    }
}

/// Lightweight handle bound to one step name.
///
/// Returned by [`Chapter::step`]; convenience sugar over
/// [`Chapter::record`].
pub struct Step<'c> {
    chapter: &'c mut Chapter,
    name: String,
}

impl<'c> Step<'c> {
    /// Record the step with an arbitrary value.
    pub fn with_data(self, data: impl Into<FieldValue>) -> Result<&'c mut Chapter> {
        self.chapter.record(self.name, data)
    }

    /// Record the step with a positionally interpolated message.
    pub fn with_message(self, template: &str, args: &[FieldValue]) -> Result<&'c mut Chapter> {
        let message = interpolate(template, args);
        self.chapter.record(self.name, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::core::registry::LoggerRegistry;
    use crate::sinks::NullSink;

    fn registry() -> LoggerRegistry {
        LoggerRegistry::new(
            Config::builder()
                .min_level(Level::Trace)
                .sink(NullSink::new())
                .build(),
        )
    }

    #[test]
    fn test_chapter_opens_and_closes() {
        let registry = registry();
        let mut chapter = registry.info().begin_chapter("checkout");
        assert_eq!(chapter.name(), "checkout");
        assert!(!chapter.is_closed());

        chapter.close();
        assert!(chapter.is_closed());
    }

    #[test]
    fn test_record_after_close_fails() {
        let registry = registry();
        let mut chapter = registry.info().begin_chapter("checkout");
        chapter.close();

        let err = chapter.record("late", "step").unwrap_err();
        assert!(matches!(err, LoggerError::ClosedChapter(_)));
        assert!(err.to_string().contains("checkout"));

        assert!(chapter.context("k", "v").is_err());
        assert!(chapter.tag("t", "v").is_err());
        assert!(chapter.records(HashMap::new()).is_err());
    }

    #[test]
    fn test_close_is_idempotent() {
        let registry = registry();
        let mut chapter = registry.info().begin_chapter("idempotent");
        chapter.close();
        let frozen = chapter.elapsed();
        chapter.close();
        assert_eq!(chapter.elapsed(), frozen);
    }

    #[test]
    fn test_record_chaining_and_overwrite() {
        let registry = registry();
        let mut chapter = registry.debug().begin_chapter("steps");
        chapter
            .record("a", 1)
            .unwrap()
            .record("b", 2)
            .unwrap()
            .record("a", 3)
            .unwrap();

        assert_eq!(chapter.steps.len(), 2);
        assert_eq!(chapter.steps.get("a"), Some(&FieldValue::Int(3)));
    }

    #[test]
    fn test_records_merges_map() {
        let registry = registry();
        let mut chapter = registry.info().begin_chapter("bulk");
        let mut steps = HashMap::new();
        steps.insert("x".to_string(), FieldValue::from("1"));
        steps.insert("y".to_string(), FieldValue::from("2"));
        chapter.records(steps).unwrap();
        assert_eq!(chapter.steps.len(), 2);
    }

    #[test]
    fn test_step_sugar() {
        let registry = registry();
        let mut chapter = registry.info().begin_chapter("sugar");
        chapter.step("validation").with_data("passed").unwrap();
        chapter
            .step("charge")
            .with_message("charged {0} cents", &[FieldValue::Int(1999)])
            .unwrap();

        assert_eq!(
            chapter.steps.get("validation"),
            Some(&FieldValue::from("passed"))
        );
        assert_eq!(
            chapter.steps.get("charge"),
            Some(&FieldValue::from("charged 1999 cents"))
        );
    }

    #[test]
    fn test_elapsed_freezes_at_close() {
        let registry = registry();
        let mut chapter = registry.info().begin_chapter("timing");
        std::thread::sleep(Duration::from_millis(5));
        chapter.close();

        let first = chapter.elapsed();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(chapter.elapsed(), first);
        assert!(first >= Duration::from_millis(5));
    }

    #[test]
    fn test_elapsed_advances_while_open() {
        let registry = registry();
        let chapter = registry.info().begin_chapter("open-timing");
        let first = chapter.elapsed();
        std::thread::sleep(Duration::from_millis(5));
        assert!(chapter.elapsed() > first);
    }

    #[test]
    fn test_drop_closes() {
        let registry = registry();
        {
            let mut chapter = registry.info().begin_chapter("scoped");
            chapter.record("only", "step").unwrap();
            // Drop at end of scope must emit the completion record
            // without an explicit close(); behavior is observable in the
            // sink-capture integration tests.
        }
    }
}
