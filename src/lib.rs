//! # Rust Structured Logger
//!
//! Named, level-filtered loggers kept in a process-wide registry. Every
//! record carries the context of the statement that produced it (severity,
//! file, line, method, thread, task, host and timestamp) and converts
//! losslessly to and from a structured JSON value.
//!
//! ## Features
//!
//! - **Registry**: loggers are created on first use and reconfigured in place
//! - **Cheap when disabled**: the threshold is checked before anything is built
//! - **Multiple Sinks**: Console, file, JSON lines and in-memory sinks
//! - **Thread Safe**: handles are shared freely between threads
//! - **Contained Failures**: a failing sink or formatter never reaches the caller
//!
//! ```
//! use rust_structured_logger::prelude::*;
//! use rust_structured_logger::warn;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder()
//!     .name("payments")
//!     .level(Severity::Warn)
//!     .sink(sink.clone())
//!     .build();
//! update_logger("payments", &logger);
//!
//! let cached = get_logger("payments");
//! warn!(cached, "retrying charge {}", 17);
//! assert_eq!(sink.records()[0].message(), "retrying charge 17");
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

/// True when built with the `disable-logging` feature; the default-logger
/// and dump macros compile to nothing.
#[doc(hidden)]
pub const LOGGING_DISABLED: bool = cfg!(feature = "disable-logging");

pub mod prelude {
    pub use crate::core::{
        default_logger, get_logger, update_logger, CallContext, LogRecord, Logger, LoggerBuilder,
        LoggerError, LoggerRegistry, LoggingConfig, OutputFormat, PatternLayout, Result, Severity,
        Sink, SinkHandle, TimestampFormat, DEFAULT_LOGGER,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, JsonSink, MemorySink};
}

pub use crate::core::{
    default_logger, get_logger, update_logger, CallContext, LogRecord, Logger, LoggerBuilder,
    LoggerError, LoggerRegistry, LoggingConfig, OutputFormat, PatternLayout, Result, Severity,
    Sink, SinkHandle, TimestampFormat, DEFAULT_LOGGER, MESSAGE_LIMIT,
};
pub use sinks::{ConsoleSink, FileSink, JsonSink, MemorySink};
