//! JSON serialization of log records
//!
//! Produces the wire representation consumed by sinks. The schema is
//! fixed; field order carries no meaning and `context`/`tags` are
//! omitted entirely when empty.

use super::config::{Config, Timezone};
use super::error::Result;
use super::log_record::LogRecord;
use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::sync::{Arc, OnceLock};

static HOSTNAME: OnceLock<String> = OnceLock::new();

fn host_name() -> &'static str {
    HOSTNAME.get_or_init(|| {
        hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok())
            .unwrap_or_else(|| "unknown".to_string())
    })
}

/// Converts a [`LogRecord`] into its JSON wire text.
pub struct JsonSerializer {
    config: Arc<Config>,
}

impl JsonSerializer {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Serialize one record.
    ///
    /// Schema: `@timestamp`, `level` (lowercase), `logger`, `message`,
    /// `thread {id, name}`, then `context`/`tags` when non-empty and the
    /// configured `hostname`/`application`/`environment`/`version`
    /// fields when present.
    pub fn serialize(&self, record: &LogRecord) -> Result<String> {
        let mut root = Map::new();

        root.insert(
            "@timestamp".to_string(),
            Value::String(self.format_timestamp(&record.timestamp)),
        );
        root.insert(
            "level".to_string(),
            Value::String(record.level.as_lowercase_str().to_string()),
        );
        root.insert("logger".to_string(), Value::String(record.logger.clone()));
        root.insert("message".to_string(), Value::String(record.message.clone()));

        let mut thread = Map::new();
        thread.insert("id".to_string(), Value::Number(record.thread_id.into()));
        thread.insert("name".to_string(), Value::String(record.thread_name.clone()));
        root.insert("thread".to_string(), Value::Object(thread));

        if !record.context.is_empty() {
            let context: Map<String, Value> = record
                .context
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json_value()))
                .collect();
            root.insert("context".to_string(), Value::Object(context));
        }

        if !record.tags.is_empty() {
            let tags: Map<String, Value> = record
                .tags
                .iter()
                .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                .collect();
            root.insert("tags".to_string(), Value::Object(tags));
        }

        if self.config.include_hostname() {
            root.insert(
                "hostname".to_string(),
                Value::String(host_name().to_string()),
            );
        }
        if let Some(application) = self.config.application_name() {
            root.insert(
                "application".to_string(),
                Value::String(application.to_string()),
            );
        }
        if let Some(environment) = self.config.environment() {
            root.insert(
                "environment".to_string(),
                Value::String(environment.to_string()),
            );
        }
        if let Some(version) = self.config.application_version() {
            root.insert("version".to_string(), Value::String(version.to_string()));
        }

        let value = Value::Object(root);
        let serialized = if self.config.pretty_print() {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(serialized)
    }

    fn format_timestamp(&self, timestamp: &DateTime<Utc>) -> String {
        match self.config.timezone() {
            Timezone::Utc => timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            Timezone::Local => timestamp
                .with_timezone(&Local)
                .to_rfc3339_opts(SecondsFormat::Millis, false),
            Timezone::Fixed(offset) => timestamp
                .with_timezone(&offset)
                .to_rfc3339_opts(SecondsFormat::Millis, false),
        }
    }
}
