//! Log level definitions

use crate::core::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity level gating whether an event is recorded.
///
/// Levels are totally ordered by rank, from most verbose (`Trace`)
/// to most critical (`Error`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl Level {
    /// Numeric rank of this level. Comparisons are rank-based.
    #[inline]
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Whether an event at this level passes the given minimum level.
    #[inline]
    pub fn is_enabled(&self, minimum: Level) -> bool {
        self.rank() >= minimum.rank()
    }

    /// Whether this level ranks at or above `other`.
    #[inline]
    pub fn is_at_least(&self, other: Level) -> bool {
        self.rank() >= other.rank()
    }

    /// Whether this level ranks at or below `other`.
    #[inline]
    pub fn is_at_most(&self, other: Level) -> bool {
        self.rank() <= other.rank()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    /// Lowercase name used in serialized records.
    pub fn as_lowercase_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }

    /// Parse an optional level name, defaulting to `Info` when absent.
    ///
    /// Unset input defaulting to `Info` is a deliberate choice so callers
    /// reading levels from optional configuration get a sensible minimum.
    pub fn parse_or_default(input: Option<&str>) -> Result<Level, LoggerError> {
        match input {
            Some(s) => s.parse(),
            None => Ok(Level::Info),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    /// Case-insensitive parse accepting both long and short aliases
    /// (e.g. "WARN", "WARNING", "WRN").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TRACE" | "TR" => Ok(Level::Trace),
            "DEBUG" | "DBG" => Ok(Level::Debug),
            "INFO" | "IN" => Ok(Level::Info),
            "WARN" | "WARNING" | "WRN" => Ok(Level::Warn),
            "ERROR" | "ERR" => Ok(Level::Error),
            _ => Err(LoggerError::InvalidLevelName(s.to_string())),
        }
    }
}
