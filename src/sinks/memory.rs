//! In-memory sink, mostly for tests

use crate::core::{LogRecord, Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Default)]
struct Captured {
    lines: Vec<String>,
    records: Vec<LogRecord>,
}

/// Keeps every rendered line and record. Clones share the same buffer, so a
/// test can keep one clone and attach another to a logger.
#[derive(Clone)]
pub struct MemorySink {
    name: String,
    captured: Arc<Mutex<Captured>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::named("memory")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            captured: Arc::new(Mutex::new(Captured::default())),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.captured.lock().lines.clone()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.captured.lock().records.clone()
    }

    pub fn len(&self) -> usize {
        self.captured.lock().lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut captured = self.captured.lock();
        captured.lines.clear();
        captured.records.clear();
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for MemorySink {
    fn append(&mut self, record: &LogRecord, rendered: &str) -> Result<()> {
        let mut captured = self.captured.lock();
        captured.lines.push(rendered.to_string());
        captured.records.push(record.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
