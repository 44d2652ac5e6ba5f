//! Output format configuration for log records
//!
//! Provides different output formats for log records:
//! - Text: rendered through a [`PatternLayout`] (default)
//! - Json: the serialized record on one line
//! - Logfmt: Key-value format compatible with log aggregation tools

use super::layout::PatternLayout;
use super::log_record::LogRecord;
use super::timestamp::TimestampFormat;

/// Output format for log records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text through a pattern
    ///
    /// Example: `info  2025-01-08T10:30:45.123456Z main  main.rs:12 ...] Request processed`
    Text(PatternLayout),

    /// The record's structured form, one JSON object per line
    ///
    /// Example: `{"context":{"level":"info",...},"msg":"Request processed"}`
    Json,

    /// Logfmt format (key=value pairs)
    ///
    /// Example: `timestamp=2025-01-08T10:30:45.123Z level=info msg="Request processed"`
    Logfmt,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Text(PatternLayout::default())
    }
}

impl OutputFormat {
    /// Format a log record according to this output format
    pub fn format(&self, record: &LogRecord) -> String {
        match self {
            OutputFormat::Text(layout) => layout.render(record),
            OutputFormat::Json => record.to_json().unwrap_or_default(),
            OutputFormat::Logfmt => self.format_logfmt(record),
        }
    }

    /// Format as logfmt (key=value pairs)
    fn format_logfmt(&self, record: &LogRecord) -> String {
        let ctx = record.context();
        let mut parts = Vec::new();

        parts.push(format!(
            "timestamp={}",
            self.escape_logfmt_value(&TimestampFormat::Iso8601Micros.format(&ctx.timestamp()))
        ));
        parts.push(format!("level={}", ctx.severity()));
        // Message is always quoted
        parts.push(format!("msg={}", self.quote_logfmt_value(record.message())));
        parts.push(format!("thread={}", self.escape_logfmt_value(ctx.thread_name())));
        if !ctx.task_name().is_empty() {
            parts.push(format!("task={}", self.escape_logfmt_value(ctx.task_name())));
        }
        if !ctx.host_name().is_empty() {
            parts.push(format!("host={}", self.escape_logfmt_value(ctx.host_name())));
        }
        parts.push(format!("file={}", self.escape_logfmt_value(ctx.file())));
        parts.push(format!("line={}", ctx.line()));
        parts.push(format!("method={}", self.escape_logfmt_value(ctx.method())));
        if !ctx.context().is_empty() {
            parts.push(format!("context={}", self.quote_logfmt_value(ctx.context())));
        }

        parts.join(" ")
    }

    /// Escape a logfmt value (quote if contains spaces)
    fn escape_logfmt_value(&self, value: &str) -> String {
        if value.is_empty() || value.contains([' ', '"', '=']) {
            self.quote_logfmt_value(value)
        } else {
            value.to_string()
        }
    }

    /// Quote a logfmt value
    fn quote_logfmt_value(&self, value: &str) -> String {
        let escaped = value
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
            .replace('\r', "\\r");
        format!("\"{escaped}\"")
    }
}
