//! Logging configuration
//!
//! A `Config` instance is static for its lifetime except for the sink
//! list, which is read-mostly and may be mutated rarely (add/remove).

use super::log_level::Level;
use super::sink::Sink;
use crate::sinks::ConsoleSink;
use chrono::FixedOffset;
use parking_lot::RwLock;

/// Timezone used when rendering record timestamps.
///
/// Timestamps are captured in UTC; the timezone only affects the
/// rendered `@timestamp` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timezone {
    #[default]
    Utc,
    Local,
    Fixed(FixedOffset),
}

/// Configuration consumed by loggers, the serializer, and sinks.
pub struct Config {
    min_level: Level,
    pretty_print: bool,
    include_hostname: bool,
    debug_to_console: bool,
    application_name: Option<String>,
    application_version: Option<String>,
    environment: Option<String>,
    timezone: Timezone,
    sinks: RwLock<Vec<Box<dyn Sink>>>,
}

impl Config {
    /// Create a builder with default values.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    pub fn pretty_print(&self) -> bool {
        self.pretty_print
    }

    pub fn include_hostname(&self) -> bool {
        self.include_hostname
    }

    /// Whether serialized records are additionally mirrored to stderr.
    pub fn debug_to_console(&self) -> bool {
        self.debug_to_console
    }

    pub fn application_name(&self) -> Option<&str> {
        self.application_name.as_deref()
    }

    pub fn application_version(&self) -> Option<&str> {
        self.application_version.as_deref()
    }

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    pub fn timezone(&self) -> Timezone {
        self.timezone
    }

    /// The ordered sink list. Writes fan out to every entry.
    pub fn sinks(&self) -> &RwLock<Vec<Box<dyn Sink>>> {
        &self.sinks
    }

    /// Append a sink to the fan-out list.
    pub fn add_sink(&self, sink: Box<dyn Sink>) {
        self.sinks.write().push(sink);
    }

    /// Remove every sink with the given name, closing each.
    pub fn remove_sink(&self, name: &str) {
        let mut sinks = self.sinks.write();
        sinks.retain_mut(|sink| {
            if sink.name() == name {
                if let Err(e) = sink.close() {
                    eprintln!("chapterlog: failed to close sink '{}': {}", name, e);
                }
                false
            } else {
                true
            }
        });
    }

    /// Remove all sinks, closing each.
    pub fn clear_sinks(&self) {
        let mut sinks = self.sinks.write();
        for sink in sinks.iter_mut() {
            if let Err(e) = sink.close() {
                eprintln!("chapterlog: failed to close sink '{}': {}", sink.name(), e);
            }
        }
        sinks.clear();
    }

    /// Names of the configured sinks, in fan-out order.
    pub fn sink_names(&self) -> Vec<String> {
        self.sinks
            .read()
            .iter()
            .map(|sink| sink.name().to_string())
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        ConfigBuilder::new().build()
    }
}

/// Builder for `Config` with a fluent API
///
/// # Example
/// ```
/// use chapterlog::core::{Config, Level};
///
/// let config = Config::builder()
///     .min_level(Level::Debug)
///     .application_name("billing")
///     .environment("production")
///     .pretty_print(false)
///     .build();
/// ```
pub struct ConfigBuilder {
    min_level: Level,
    pretty_print: bool,
    include_hostname: bool,
    debug_to_console: bool,
    application_name: Option<String>,
    application_version: Option<String>,
    environment: Option<String>,
    timezone: Timezone,
    sinks: Vec<Box<dyn Sink>>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            min_level: Level::Info,
            pretty_print: false,
            include_hostname: true,
            debug_to_console: false,
            application_name: None,
            application_version: None,
            environment: None,
            timezone: Timezone::Utc,
            sinks: Vec::new(),
        }
    }

    /// Set the minimum level; events below it produce no output.
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Toggle JSON indentation. No effect on field content.
    #[must_use = "builder methods return a new value"]
    pub fn pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Whether serialized records carry a `hostname` field.
    #[must_use = "builder methods return a new value"]
    pub fn include_hostname(mut self, include: bool) -> Self {
        self.include_hostname = include;
        self
    }

    /// Also mirror every serialized record to stderr.
    #[must_use = "builder methods return a new value"]
    pub fn debug_to_console(mut self, debug: bool) -> Self {
        self.debug_to_console = debug;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn application_version(mut self, version: impl Into<String>) -> Self {
        self.application_version = Some(version.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }

    /// Append an output sink.
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Build the configuration.
    ///
    /// When no sinks were added, a default console sink is installed so
    /// a freshly built config always has somewhere to write.
    pub fn build(self) -> Config {
        let sinks: Vec<Box<dyn Sink>> = if self.sinks.is_empty() {
            vec![Box::new(ConsoleSink::new())]
        } else {
            self.sinks
        };

        Config {
            min_level: self.min_level,
            pretty_print: self.pretty_print,
            include_hostname: self.include_hostname,
            debug_to_console: self.debug_to_console,
            application_name: self.application_name,
            application_version: self.application_version,
            environment: self.environment,
            timezone: self.timezone,
            sinks: RwLock::new(sinks),
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
