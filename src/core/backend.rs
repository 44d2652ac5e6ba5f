//! Render-and-dispatch engine bound to each logger

use super::diagnostic::panic_message;
use super::error::{LoggerError, Result};
use super::log_record::LogRecord;
use super::output_format::OutputFormat;
use super::sink::SinkHandle;
use std::panic::{self, AssertUnwindSafe};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Backend {
    format: OutputFormat,
}

impl Backend {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> &OutputFormat {
        &self.format
    }

    pub fn render(&self, record: &LogRecord) -> String {
        self.format.format(record)
    }

    /// Render `record` once and write it to every sink in order.
    ///
    /// **Per-sink isolation**: a sink that returns an error or panics is
    /// reported on stderr and skipped; the remaining sinks still receive the
    /// record. Returns the number of sinks that failed.
    pub fn dispatch(&self, record: &LogRecord, sinks: &[SinkHandle]) -> usize {
        if sinks.is_empty() {
            return 0;
        }

        let rendered = self.render(record);
        let mut failed = 0;

        for (idx, sink) in sinks.iter().enumerate() {
            let append_result =
                panic::catch_unwind(AssertUnwindSafe(|| sink.append(record, &rendered)));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Sink #{} '{}' failed: {}", idx, sink.name(), e);
                    failed += 1;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Sink #{} '{}' panicked: {}. \
                         Other sinks continue to function.",
                        idx,
                        sink.name(),
                        panic_message(panic_info.as_ref())
                    );
                    failed += 1;
                }
            }
        }

        failed
    }

    /// Flush every sink, attempting all of them; the first failure is returned.
    pub fn flush(&self, sinks: &[SinkHandle]) -> Result<()> {
        let mut first_error = None;
        for sink in sinks {
            let flush_result = panic::catch_unwind(AssertUnwindSafe(|| sink.flush()))
                .unwrap_or_else(|panic_info| {
                    Err(LoggerError::sink(sink.name(), panic_message(panic_info.as_ref())))
                });
            if let Err(e) = flush_result {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
