//! Console sink implementation

use crate::core::{LogRecord, Result, Severity, Sink};
use std::io::Write;

/// Which stream non-error records go to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsoleStream {
    #[default]
    Stdout,
    Stderr,
}

pub struct ConsoleSink {
    use_colors: bool,
    stream: ConsoleStream,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            stream: ConsoleStream::Stdout,
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            stream: ConsoleStream::Stdout,
        }
    }

    /// Send non-error records to `stream` instead of stdout
    #[must_use]
    pub fn with_stream(mut self, stream: ConsoleStream) -> Self {
        self.stream = stream;
        self
    }

    #[cfg(feature = "console")]
    fn paint(&self, severity: Severity, rendered: &str) -> String {
        use colored::Colorize;
        if self.use_colors {
            rendered.color(severity.color_code()).to_string()
        } else {
            rendered.to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, _severity: Severity, rendered: &str) -> String {
        rendered.to_string()
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn append(&mut self, record: &LogRecord, rendered: &str) -> Result<()> {
        let severity = record.context().severity();
        let output = self.paint(severity, rendered);

        // Errors always go to stderr
        if severity >= Severity::Error || self.stream == ConsoleStream::Stderr {
            writeln!(std::io::stderr().lock(), "{output}")?;
        } else {
            writeln!(std::io::stdout().lock(), "{output}")?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
