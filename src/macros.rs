//! Logging macros for ergonomic event emission.
//!
//! The `*_here!` macros pass `module_path!()` as the logger name, so
//! records are attributed to the calling module without any runtime
//! caller inspection.
//!
//! # Examples
//!
//! ```
//! use chapterlog::core::{Config, Level, LoggerRegistry};
//! use chapterlog::sinks::NullSink;
//! use chapterlog::{info_here, warn_here};
//!
//! let registry = LoggerRegistry::new(
//!     Config::builder().min_level(Level::Trace).sink(NullSink::new()).build(),
//! );
//!
//! info_here!(registry, "server started");
//!
//! let port = 8080;
//! warn_here!(registry, "port {} already bound, retrying", port);
//! ```

/// Emit a message at an arbitrary level, attributed to the calling module.
///
/// The message is always set here, so the fluent terminal cannot fail.
#[macro_export]
macro_rules! log_here {
    ($registry:expr, $level:expr, $($arg:tt)+) => {{
        let _ = $registry
            .at($level)
            .logger_name(module_path!())
            .message(format!($($arg)+))
            .log();
    }};
}

/// Emit a trace-level message attributed to the calling module.
#[macro_export]
macro_rules! trace_here {
    ($registry:expr, $($arg:tt)+) => {
        $crate::log_here!($registry, $crate::core::Level::Trace, $($arg)+)
    };
}

/// Emit a debug-level message attributed to the calling module.
#[macro_export]
macro_rules! debug_here {
    ($registry:expr, $($arg:tt)+) => {
        $crate::log_here!($registry, $crate::core::Level::Debug, $($arg)+)
    };
}

/// Emit an info-level message attributed to the calling module.
#[macro_export]
macro_rules! info_here {
    ($registry:expr, $($arg:tt)+) => {
        $crate::log_here!($registry, $crate::core::Level::Info, $($arg)+)
    };
}

/// Emit a warn-level message attributed to the calling module.
#[macro_export]
macro_rules! warn_here {
    ($registry:expr, $($arg:tt)+) => {
        $crate::log_here!($registry, $crate::core::Level::Warn, $($arg)+)
    };
}

/// Emit an error-level message attributed to the calling module.
#[macro_export]
macro_rules! error_here {
    ($registry:expr, $($arg:tt)+) => {
        $crate::log_here!($registry, $crate::core::Level::Error, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Config, Level, LoggerRegistry};
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
    fn test_macros_all_levels() {
        let registry = registry();
        trace_here!(registry, "trace");
        debug_here!(registry, "debug");
        info_here!(registry, "info");
        warn_here!(registry, "warn");
        error_here!(registry, "error");
    }

    #[test]
    fn test_macro_formatting() {
        let registry = registry();
        let user = "alice";
        info_here!(registry, "user {} logged in from {}", user, "10.0.0.1");
    }

    #[test]
    fn test_macro_registers_module_logger() {
        let registry = registry();
        info_here!(registry, "attribution check");
        // module_path!() of this test module
        let logger = registry.logger("chapterlog::macros::tests");
        assert_eq!(logger.name(), "chapterlog::macros::tests");
    }
}
