//! Sink trait for log output destinations

use super::{error::Result, log_record::LogRecord};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

pub trait Sink: Send {
    /// Write one record. `rendered` is the backend's text rendering of it.
    fn append(&mut self, record: &LogRecord, rendered: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Shared handle to a sink; clones refer to the same destination.
///
/// The same handle can be attached to several loggers. Writes lock only
/// this sink, for the duration of one `append`.
#[derive(Clone)]
pub struct SinkHandle {
    name: Arc<str>,
    sink: Arc<Mutex<Box<dyn Sink>>>,
}

impl SinkHandle {
    pub fn new<S: Sink + 'static>(sink: S) -> Self {
        Self::from_box(Box::new(sink))
    }

    pub fn from_box(sink: Box<dyn Sink>) -> Self {
        Self {
            name: Arc::from(sink.name()),
            sink: Arc::new(Mutex::new(sink)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn append(&self, record: &LogRecord, rendered: &str) -> Result<()> {
        self.sink.lock().append(record, rendered)
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.lock().flush()
    }

    /// Whether both handles refer to the same sink.
    pub fn same_sink(&self, other: &SinkHandle) -> bool {
        Arc::ptr_eq(&self.sink, &other.sink)
    }
}

impl fmt::Debug for SinkHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkHandle").field("name", &self.name).finish()
    }
}
