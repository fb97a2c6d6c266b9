//! Core logging types and traits

pub mod builder;
pub mod chapter;
pub mod config;
pub mod context;
pub mod error;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod registry;
pub mod serializer;
pub mod sink;

pub use builder::FluentBuilder;
pub use chapter::{Chapter, Step};
pub use config::{Config, ConfigBuilder, Timezone};
pub use context::{FieldValue, ThreadContext};
pub use error::{LoggerError, Result};
pub use log_level::Level;
pub use log_record::LogRecord;
pub use logger::{interpolate, Logger};
pub use registry::{LoggerRegistry, DEFAULT_LOGGER_NAME};
pub use serializer::JsonSerializer;
pub use sink::Sink;
