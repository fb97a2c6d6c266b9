//! Field values and the per-thread ambient context store
//!
//! This module provides:
//! - `FieldValue`: the value type for structured context fields
//! - `ThreadContext`: per-thread ambient context and tags merged into
//!   every log record produced on that thread

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Array(Vec<FieldValue>),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(FieldValue::to_json_value).collect())
            }
            FieldValue::Null => serde_json::Value::Null,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::Array(items.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Default)]
struct AmbientStore {
    context: HashMap<String, FieldValue>,
    tags: HashMap<String, String>,
}

thread_local! {
    // Created lazily on first mutation; snapshots of an absent store are empty.
    static AMBIENT: RefCell<Option<AmbientStore>> = const { RefCell::new(None) };
}

/// Per-thread ambient context store.
///
/// Each thread owns its store exclusively: entries set here are merged
/// into every log record produced on the same thread (call-local values
/// win on key collision) and are never visible from other threads.
/// The store is created lazily on first use and lives until
/// [`ThreadContext::drop_current`] or thread exit.
///
/// # Example
///
/// ```
/// use chapterlog::core::ThreadContext;
///
/// ThreadContext::put("request_id", "abc-123");
/// ThreadContext::put_tag("security", "auth");
///
/// let context = ThreadContext::snapshot_context();
/// assert!(context.contains_key("request_id"));
///
/// ThreadContext::clear();
/// ```
pub struct ThreadContext;

impl ThreadContext {
    fn with_store<R>(f: impl FnOnce(&mut AmbientStore) -> R) -> R {
        AMBIENT.with(|cell| {
            let mut slot = cell.borrow_mut();
            f(slot.get_or_insert_with(AmbientStore::default))
        })
    }

    /// Set a free-form context value for the current thread.
    pub fn put(key: impl Into<String>, value: impl Into<FieldValue>) {
        Self::with_store(|store| {
            store.context.insert(key.into(), value.into());
        });
    }

    /// Get a context value, if present.
    pub fn get(key: &str) -> Option<FieldValue> {
        AMBIENT.with(|cell| {
            cell.borrow()
                .as_ref()
                .and_then(|store| store.context.get(key).cloned())
        })
    }

    /// Remove a context value.
    pub fn remove(key: &str) {
        AMBIENT.with(|cell| {
            if let Some(store) = cell.borrow_mut().as_mut() {
                store.context.remove(key);
            }
        });
    }

    /// Set a tag for the current thread.
    pub fn put_tag(key: impl Into<String>, value: impl Into<String>) {
        Self::with_store(|store| {
            store.tags.insert(key.into(), value.into());
        });
    }

    /// Get a tag value, if present.
    pub fn get_tag(key: &str) -> Option<String> {
        AMBIENT.with(|cell| {
            cell.borrow()
                .as_ref()
                .and_then(|store| store.tags.get(key).cloned())
        })
    }

    /// Remove a tag.
    pub fn remove_tag(key: &str) {
        AMBIENT.with(|cell| {
            if let Some(store) = cell.borrow_mut().as_mut() {
                store.tags.remove(key);
            }
        });
    }

    /// Independent copy of the current thread's context map.
    ///
    /// Mutating the snapshot never affects the store and vice versa.
    pub fn snapshot_context() -> HashMap<String, FieldValue> {
        AMBIENT.with(|cell| {
            cell.borrow()
                .as_ref()
                .map(|store| store.context.clone())
                .unwrap_or_default()
        })
    }

    /// Independent copy of the current thread's tag map.
    pub fn snapshot_tags() -> HashMap<String, String> {
        AMBIENT.with(|cell| {
            cell.borrow()
                .as_ref()
                .map(|store| store.tags.clone())
                .unwrap_or_default()
        })
    }

    /// Number of context entries on the current thread.
    pub fn context_len() -> usize {
        AMBIENT.with(|cell| {
            cell.borrow()
                .as_ref()
                .map(|store| store.context.len())
                .unwrap_or(0)
        })
    }

    /// Number of tags on the current thread.
    pub fn tags_len() -> usize {
        AMBIENT.with(|cell| {
            cell.borrow()
                .as_ref()
                .map(|store| store.tags.len())
                .unwrap_or(0)
        })
    }

    /// Wipe both maps for the current thread only.
    pub fn clear() {
        AMBIENT.with(|cell| {
            if let Some(store) = cell.borrow_mut().as_mut() {
                store.context.clear();
                store.tags.clear();
            }
        });
    }

    /// Release the entire per-thread store.
    ///
    /// Intended for end-of-unit-of-work cleanup (e.g. after a request);
    /// the next use on this thread recreates an empty store.
    pub fn drop_current() {
        AMBIENT.with(|cell| {
            *cell.borrow_mut() = None;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Ambient-store tests each run on a dedicated thread so they cannot
    // observe each other's state regardless of test-runner threading.
    fn on_fresh_thread(f: impl FnOnce() + Send + 'static) {
        std::thread::spawn(f).join().expect("test thread panicked");
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::from("alice").to_string(), "alice");
        assert_eq!(FieldValue::Int(42).to_string(), "42");
        assert_eq!(FieldValue::Bool(true).to_string(), "true");
        assert_eq!(FieldValue::Null.to_string(), "null");
        assert_eq!(
            FieldValue::from(vec!["a", "b"]).to_string(),
            "[a, b]"
        );
    }

    #[test]
    fn test_field_value_to_json() {
        assert_eq!(FieldValue::Int(7).to_json_value(), serde_json::json!(7));
        assert_eq!(FieldValue::Null.to_json_value(), serde_json::Value::Null);
        assert_eq!(
            FieldValue::from(vec![1, 2]).to_json_value(),
            serde_json::json!([1, 2])
        );
        // Non-finite floats degrade to null rather than invalid JSON
        assert_eq!(
            FieldValue::Float(f64::NAN).to_json_value(),
            serde_json::Value::Null
        );
    }

    #[test]
    fn test_put_get_remove() {
        on_fresh_thread(|| {
            ThreadContext::put("user_id", "12345");
            assert_eq!(
                ThreadContext::get("user_id"),
                Some(FieldValue::from("12345"))
            );

            ThreadContext::remove("user_id");
            assert_eq!(ThreadContext::get("user_id"), None);
        });
    }

    #[test]
    fn test_tags_independent_of_context() {
        on_fresh_thread(|| {
            ThreadContext::put("key", "ctx-value");
            ThreadContext::put_tag("key", "tag-value");

            assert_eq!(ThreadContext::get("key"), Some(FieldValue::from("ctx-value")));
            assert_eq!(ThreadContext::get_tag("key"), Some("tag-value".to_string()));

            ThreadContext::remove_tag("key");
            assert_eq!(ThreadContext::get_tag("key"), None);
            // Context entry untouched
            assert_eq!(ThreadContext::context_len(), 1);
        });
    }

    #[test]
    fn test_snapshot_is_independent_copy() {
        on_fresh_thread(|| {
            ThreadContext::put("a", 1);
            let mut snapshot = ThreadContext::snapshot_context();
            snapshot.insert("b".to_string(), FieldValue::Int(2));

            assert_eq!(ThreadContext::context_len(), 1);
            assert_eq!(ThreadContext::get("b"), None);
        });
    }

    #[test]
    fn test_clear_wipes_both_maps() {
        on_fresh_thread(|| {
            ThreadContext::put("a", 1);
            ThreadContext::put_tag("t", "v");
            ThreadContext::clear();

            assert_eq!(ThreadContext::context_len(), 0);
            assert_eq!(ThreadContext::tags_len(), 0);
        });
    }

    #[test]
    fn test_drop_current_releases_store() {
        on_fresh_thread(|| {
            ThreadContext::put("a", 1);
            ThreadContext::drop_current();

            assert!(ThreadContext::snapshot_context().is_empty());
            // Store is recreated on next use
            ThreadContext::put("b", 2);
            assert_eq!(ThreadContext::context_len(), 1);
        });
    }

    #[test]
    fn test_isolation_between_threads() {
        on_fresh_thread(|| {
            ThreadContext::put("user_id", "1");

            let other = std::thread::spawn(|| ThreadContext::snapshot_context())
                .join()
                .expect("thread panicked");
            assert!(other.is_empty());

            // Our own entry is still there
            assert_eq!(ThreadContext::get("user_id"), Some(FieldValue::from("1")));
        });
    }
}
