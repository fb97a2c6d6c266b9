//! Per-name log dispatcher
//!
//! A `Logger` applies level gating, interpolates the message, merges
//! ambient and call-local context, and fans the serialized record out
//! to every configured sink.

use super::config::Config;
use super::context::{FieldValue, ThreadContext};
use super::log_level::Level;
use super::log_record::LogRecord;
use super::serializer::JsonSerializer;
use std::collections::HashMap;
use std::sync::Arc;

/// Interpolate positional placeholders `{0}`, `{1}`, ... against `args`.
///
/// A single left-to-right substitution pass, not a format parser: each
/// occurrence of `{i}` is replaced by the i-th argument's string form
/// (`null` for a null argument). Placeholders beyond the argument list
/// remain literal, and no escaping is performed.
pub fn interpolate(message: &str, args: &[FieldValue]) -> String {
    if args.is_empty() {
        return message.to_string();
    }

    let mut result = message.to_string();
    for (index, arg) in args.iter().enumerate() {
        let placeholder = format!("{{{}}}", index);
        if result.contains(&placeholder) {
            result = result.replace(&placeholder, &arg.to_string());
        }
    }
    result
}

pub struct Logger {
    name: String,
    config: Arc<Config>,
    serializer: JsonSerializer,
}

impl Logger {
    pub fn new(name: impl Into<String>, config: Arc<Config>) -> Self {
        let serializer = JsonSerializer::new(Arc::clone(&config));
        Self {
            name: name.into(),
            config,
            serializer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether an event at `level` would produce output.
    #[inline]
    pub fn is_level_enabled(&self, level: Level) -> bool {
        level.is_enabled(self.config.min_level())
    }

    /// Emit one log event.
    ///
    /// Below the configured minimum this returns before any record is
    /// allocated. Otherwise the message is interpolated against `args`,
    /// the calling thread's ambient context and tags are snapshotted and
    /// overlaid with the call-local maps (call-local wins on collision),
    /// and the serialized record is written to every configured sink.
    ///
    /// Serialization and sink failures are reported to stderr and never
    /// propagate out of this method.
    pub fn log(
        &self,
        level: Level,
        message: &str,
        call_context: HashMap<String, FieldValue>,
        call_tags: HashMap<String, String>,
        args: &[FieldValue],
    ) {
        if !self.is_level_enabled(level) {
            return;
        }

        let message = interpolate(message, args);

        let mut context = ThreadContext::snapshot_context();
        context.extend(call_context);
        let mut tags = ThreadContext::snapshot_tags();
        tags.extend(call_tags);

        let record = LogRecord::new(level, self.name.clone(), message, context, tags);
        self.dispatch(&record);
    }

    /// Emit one log event using only the ambient context and tags.
    pub fn log_ambient(&self, level: Level, message: &str, args: &[FieldValue]) {
        self.log(level, message, HashMap::new(), HashMap::new(), args);
    }

    fn dispatch(&self, record: &LogRecord) {
        let serialized = match self.serializer.serialize(record) {
            Ok(serialized) => serialized,
            Err(e) => {
                // Fallback channel: the record is lost but the failure is
                // visible and the caller continues normally.
                eprintln!(
                    "chapterlog: serialization failed for logger '{}': {}",
                    self.name, e
                );
                return;
            }
        };

        let mut sinks = self.config.sinks().write();
        for sink in sinks.iter_mut() {
            if let Err(e) = sink.write(&serialized) {
                eprintln!("chapterlog: sink '{}' write failed: {}", sink.name(), e);
            }
        }
        drop(sinks);

        if self.config.debug_to_console() {
            eprintln!("{}", serialized);
        }
    }

    /// Flush every configured sink.
    pub fn flush(&self) {
        let mut sinks = self.config.sinks().write();
        for sink in sinks.iter_mut() {
            if let Err(e) = sink.flush() {
                eprintln!("chapterlog: sink '{}' flush failed: {}", sink.name(), e);
            }
        }
    }

    /// Add an ambient context entry for the calling thread.
    ///
    /// Delegates to the thread's ambient store; the logger itself holds
    /// no private context.
    pub fn add_context(&self, key: impl Into<String>, value: impl Into<FieldValue>) {
        ThreadContext::put(key, value);
    }

    /// Remove an ambient context entry for the calling thread.
    pub fn remove_context(&self, key: &str) {
        ThreadContext::remove(key);
    }

    /// Add an ambient tag for the calling thread.
    pub fn add_tag(&self, key: impl Into<String>, value: impl Into<String>) {
        ThreadContext::put_tag(key, value);
    }

    /// Remove an ambient tag for the calling thread.
    pub fn remove_tag(&self, key: &str) {
        ThreadContext::remove_tag(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_basic() {
        let args = vec![FieldValue::from("alice"), FieldValue::from("NY")];
        assert_eq!(
            interpolate("User {0} at {1}", &args),
            "User alice at NY"
        );
    }

    #[test]
    fn test_interpolate_empty_args_is_identity() {
        assert_eq!(interpolate("User {0} at {1}", &[]), "User {0} at {1}");
    }

    #[test]
    fn test_interpolate_missing_arg_stays_literal() {
        let args = vec![FieldValue::from("alice")];
        assert_eq!(interpolate("User {0} at {1}", &args), "User alice at {1}");
    }

    #[test]
    fn test_interpolate_null_renders_literal_null() {
        let args = vec![FieldValue::Null];
        assert_eq!(interpolate("value={0}", &args), "value=null");
    }

    #[test]
    fn test_interpolate_repeated_placeholder() {
        let args = vec![FieldValue::from("x")];
        assert_eq!(interpolate("{0} and {0}", &args), "x and x");
    }

    #[test]
    fn test_interpolate_non_string_args() {
        let args = vec![FieldValue::Int(3), FieldValue::Bool(true)];
        assert_eq!(interpolate("retries={0} final={1}", &args), "retries=3 final=true");
    }

    #[test]
    fn test_is_level_enabled_tracks_config() {
        let config = Arc::new(
            Config::builder()
                .min_level(Level::Warn)
                .sink(crate::sinks::NullSink::new())
                .build(),
        );
        let logger = Logger::new("gate", config);

        assert!(logger.is_level_enabled(Level::Error));
        assert!(logger.is_level_enabled(Level::Warn));
        assert!(!logger.is_level_enabled(Level::Info));
    }
}
