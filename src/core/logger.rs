//! Named logger handles

use super::{
    backend::Backend,
    call_context::CallContext,
    diagnostic,
    error::Result,
    log_record::LogRecord,
    output_format::OutputFormat,
    registry::DEFAULT_LOGGER,
    severity::Severity,
    sink::SinkHandle,
};
use parking_lot::RwLock;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Configuration snapshot of a logger. Replaced wholesale, never edited in
/// place while shared.
#[derive(Debug, Clone, Default)]
struct LoggerState {
    level: Severity,
    sinks: Vec<SinkHandle>,
    backend: Backend,
}

struct Slot {
    name: RwLock<String>,
    state: RwLock<Arc<LoggerState>>,
}

/// Handle to a named logger.
///
/// Cloning is cheap and every clone observes the same threshold and sinks.
/// Comparison is by identity: two handles are equal when they refer to the
/// same logger. An unset logger is `Option::<Logger>::None`.
///
/// # Example
///
/// ```
/// use rust_structured_logger::prelude::*;
///
/// let logger = Logger::new("net");
/// logger.set_level(Severity::Debug);
/// assert!(logger.is_enabled(Severity::Debug));
/// assert!(!logger.is_enabled(Severity::All));
/// ```
#[derive(Clone)]
pub struct Logger {
    slot: Arc<Slot>,
}

impl Logger {
    /// A logger with the default threshold (`info`) and no sinks.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_state(name.into(), Arc::new(LoggerState::default()))
    }

    /// A logger seeded with `parent`'s threshold, sinks and format as they
    /// are right now. Later changes to the parent are not seen.
    #[must_use]
    pub fn from_parent(name: impl Into<String>, parent: Option<&Logger>) -> Self {
        match parent {
            Some(parent) => Self::from_state(name.into(), parent.snapshot()),
            None => Self::new(name),
        }
    }

    fn from_state(name: String, state: Arc<LoggerState>) -> Self {
        Self {
            slot: Arc::new(Slot {
                name: RwLock::new(name),
                state: RwLock::new(state),
            }),
        }
    }

    fn snapshot(&self) -> Arc<LoggerState> {
        Arc::clone(&self.slot.state.read())
    }

    fn modify(&self, f: impl FnOnce(&mut LoggerState)) {
        let mut state = self.slot.state.write();
        f(Arc::make_mut(&mut *state));
    }

    /// Replace this logger's configuration with `other`'s current one.
    pub(crate) fn install(&self, other: &Logger) {
        // Snapshot first: `other` may be this very logger
        let snapshot = other.snapshot();
        *self.slot.state.write() = snapshot;
    }

    pub fn name(&self) -> String {
        self.slot.name.read().clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        *self.slot.name.write() = name.into();
    }

    pub fn set_level(&self, level: Severity) -> &Self {
        self.modify(|state| state.level = level);
        self
    }

    pub fn level(&self) -> Severity {
        self.slot.state.read().level
    }

    #[inline]
    pub fn is_enabled(&self, severity: Severity) -> bool {
        Severity::is_enabled(severity, self.level())
    }

    /// Attach a sink; records go to sinks in attachment order.
    pub fn add_sink(&self, sink: SinkHandle) -> &Self {
        self.modify(|state| state.sinks.push(sink));
        self
    }

    pub fn sinks(&self) -> Vec<SinkHandle> {
        self.slot.state.read().sinks.clone()
    }

    pub fn set_format(&self, format: OutputFormat) -> &Self {
        self.modify(|state| state.backend = Backend::new(format));
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.slot.state.read().backend.format().clone()
    }

    /// Hand `record` to the backend without checking the threshold.
    ///
    /// Callers check [`is_enabled`](Self::is_enabled) first; the logging
    /// macros do so before building the record. No lock is held while
    /// sinks write. A panic while rendering or writing is reported on
    /// stderr against the caller's location and never leaves this call.
    #[track_caller]
    pub fn log(&self, record: LogRecord) {
        let location = Location::caller();
        diagnostic::contain(location.file(), location.line(), || self.emit(&record));
    }

    pub fn flush(&self) -> Result<()> {
        let state = self.snapshot();
        state.backend.flush(&state.sinks)
    }

    fn emit(&self, record: &LogRecord) {
        let state = self.snapshot();
        state.backend.dispatch(record, &state.sinks);
    }

    #[track_caller]
    fn log_message(&self, severity: Severity, message: fmt::Arguments<'_>) {
        if !self.is_enabled(severity) {
            return;
        }
        let location = Location::caller();
        diagnostic::contain(location.file(), location.line(), || {
            let context =
                CallContext::new(severity, location.file(), u64::from(location.line()), "");
            self.emit(&LogRecord::new(context, fmt::format(message)));
        });
    }

    /// Log at `debug`. The message is only formatted when enabled.
    ///
    /// ```
    /// use rust_structured_logger::prelude::*;
    ///
    /// let logger = Logger::new("cache");
    /// logger.debug(format_args!("evicted {} entries", 12));
    /// ```
    #[inline]
    #[track_caller]
    pub fn debug(&self, message: fmt::Arguments<'_>) {
        self.log_message(Severity::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: fmt::Arguments<'_>) {
        self.log_message(Severity::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: fmt::Arguments<'_>) {
        self.log_message(Severity::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: fmt::Arguments<'_>) {
        self.log_message(Severity::Error, message);
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_structured_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .name("db")
    ///     .level(Severity::Debug)
    ///     .sink(MemorySink::new())
    ///     .build();
    /// assert_eq!(logger.name(), "db");
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}

impl Eq for Logger {}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.snapshot();
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("level", &state.level)
            .field("sinks", &state.sinks)
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
pub struct LoggerBuilder {
    name: String,
    parent: Option<Logger>,
    level: Option<Severity>,
    sinks: Vec<SinkHandle>,
    format: Option<OutputFormat>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: DEFAULT_LOGGER.to_string(),
            parent: None,
            level: None,
            sinks: Vec::new(),
            format: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Seed threshold, sinks and format from `parent` at build time
    #[must_use = "builder methods return a new value"]
    pub fn parent(mut self, parent: &Logger) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    /// Set the threshold
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Severity) -> Self {
        self.level = Some(level);
        self
    }

    /// Attach a sink (after any inherited from the parent)
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: super::sink::Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(SinkHandle::new(sink));
        self
    }

    /// Attach an existing shared sink
    #[must_use = "builder methods return a new value"]
    pub fn sink_handle(mut self, sink: SinkHandle) -> Self {
        self.sinks.push(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let logger = Logger::from_parent(self.name, self.parent.as_ref());
        if let Some(level) = self.level {
            logger.set_level(level);
        }
        if let Some(format) = self.format {
            logger.set_format(format);
        }
        for sink in self.sinks {
            logger.add_sink(sink);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
