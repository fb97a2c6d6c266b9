//! Error types for the logging core

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Level text could not be parsed
    #[error("unknown log level: '{0}'")]
    InvalidLevelName(String),

    /// Terminal `log()` called on a builder without a message
    #[error("log message not set: call .message() before .log()")]
    MissingMessage,

    /// Mutation attempted on a chapter after it was closed
    #[error("chapter '{0}' is already closed")]
    ClosedChapter(String),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Sink write or flush failure with sink name
    #[error("sink '{name}' failed: {message}")]
    Sink { name: String, message: String },
}

impl LoggerError {
    /// Create a sink error carrying the sink name
    pub fn sink(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Sink {
            name: name.into(),
            message: message.into(),
        }
    }
}
