//! Log record structure

use super::context::FieldValue;
use super::log_level::Level;
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

// `std::thread::ThreadId` has no stable integer form, so each thread is
// assigned a dense numeric id on first use. Name is cached per thread to
// avoid repeated allocations.
static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_ID: u64 = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
    static THREAD_NAME_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Numeric id of the calling thread, assigned on first use.
pub fn current_thread_id() -> u64 {
    THREAD_ID.with(|id| *id)
}

/// Human-readable name of the calling thread.
///
/// Unnamed threads get a synthetic `thread-<id>` name.
pub fn current_thread_name() -> String {
    THREAD_NAME_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_none() {
            let name = std::thread::current()
                .name()
                .map(String::from)
                .unwrap_or_else(|| format!("thread-{}", current_thread_id()));
            *cache = Some(name);
        }
        cache.as_ref().map(String::clone).unwrap_or_default()
    })
}

/// Immutable, fully-resolved representation of one logged event.
///
/// Constructed once per emitted log call with the message already
/// interpolated and the context/tag maps snapshotted; never mutated
/// afterwards, so multiple sinks may read it concurrently.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub logger: String,
    pub message: String,
    pub context: HashMap<String, FieldValue>,
    pub tags: HashMap<String, String>,
    pub thread_id: u64,
    pub thread_name: String,
}

impl LogRecord {
    pub fn new(
        level: Level,
        logger: impl Into<String>,
        message: impl Into<String>,
        context: HashMap<String, FieldValue>,
        tags: HashMap<String, String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            logger: logger.into(),
            message: message.into(),
            context,
            tags,
            thread_id: current_thread_id(),
            thread_name: current_thread_name(),
        }
    }
}
