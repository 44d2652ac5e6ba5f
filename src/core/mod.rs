//! Core logger types and traits

pub mod backend;
pub mod call_context;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod format_adapter;
pub mod identity;
pub mod layout;
pub mod log_record;
pub mod logger;
pub mod output_format;
pub mod registry;
pub mod severity;
pub mod sink;
pub mod timestamp;
pub mod variant;

pub use backend::Backend;
pub use call_context::CallContext;
pub use config::{LoggerConfig, LoggingConfig, SinkConfig, SinkKind, StreamConfig};
pub use error::{LoggerError, Result};
pub use format_adapter::{display_error, display_optional, display_set, DetailedError, ErrorChain};
pub use layout::{PatternLayout, DEFAULT_PATTERN};
pub use log_record::{LogRecord, MESSAGE_LIMIT};
pub use logger::{Logger, LoggerBuilder};
pub use output_format::OutputFormat;
pub use registry::{default_logger, get_logger, update_logger, LoggerRegistry, DEFAULT_LOGGER};
pub use severity::Severity;
pub use sink::{Sink, SinkHandle};
pub use timestamp::TimestampFormat;
pub use variant::ObjectView;
