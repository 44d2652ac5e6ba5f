//! Text rendering pattern
//!
//! A pattern is parsed once into literal and placeholder segments:
//!
//! ```
//! use rust_structured_logger::core::PatternLayout;
//!
//! let layout: PatternLayout = "{level:<5} {file}:{line} {message}".parse().unwrap();
//! assert_eq!(layout.pattern(), "{level:<5} {file}:{line} {message}");
//! ```
//!
//! Placeholders: `level`, `timestamp`, `thread`, `task`, `host`, `file`,
//! `line`, `method`, `context`, `message`. An optional `:<N` / `:>N` pads the
//! value to width `N`. `{{` and `}}` produce literal braces.

use super::error::{LoggerError, Result};
use super::log_record::LogRecord;
use super::timestamp::TimestampFormat;
use std::str::FromStr;

pub const DEFAULT_PATTERN: &str =
    "{level:<5} {timestamp} {thread:<9} {file:>20}:{line:<5} {method:<20}] {message}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Level,
    Timestamp,
    Thread,
    Task,
    Host,
    File,
    Line,
    Method,
    Context,
    Message,
}

impl Field {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "level" => Field::Level,
            "timestamp" => Field::Timestamp,
            "thread" => Field::Thread,
            "task" => Field::Task,
            "host" => Field::Host,
            "file" => Field::File,
            "line" => Field::Line,
            "method" => Field::Method,
            "context" => Field::Context,
            "message" => Field::Message,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field {
        field: Field,
        pad: Option<(Align, usize)>,
    },
}

/// Parsed text pattern used by [`OutputFormat::Text`](super::OutputFormat).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternLayout {
    pattern: String,
    segments: Vec<Segment>,
    timestamp_format: TimestampFormat,
}

impl PatternLayout {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: pattern.to_string(),
            segments: parse_segments(pattern)?,
            timestamp_format: TimestampFormat::Iso8601Micros,
        })
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn render(&self, record: &LogRecord) -> String {
        let ctx = record.context();
        let mut out = String::with_capacity(self.pattern.len() + record.message().len() + 64);

        for segment in &self.segments {
            let (field, pad) = match segment {
                Segment::Literal(text) => {
                    out.push_str(text);
                    continue;
                }
                Segment::Field { field, pad } => (*field, *pad),
            };

            let value = match field {
                Field::Level => ctx.severity().to_str().to_string(),
                Field::Timestamp => self.timestamp_format.format(&ctx.timestamp()),
                Field::Thread => ctx.thread_name().to_string(),
                Field::Task => ctx.task_name().to_string(),
                Field::Host => ctx.host_name().to_string(),
                Field::File => ctx.file().to_string(),
                Field::Line => ctx.line().to_string(),
                Field::Method => ctx.method().to_string(),
                Field::Context => ctx.context().to_string(),
                Field::Message => sanitize_message(record.message()),
            };

            match pad {
                None => out.push_str(&value),
                Some((Align::Left, width)) => out.push_str(&format!("{value:<width$}")),
                Some((Align::Right, width)) => out.push_str(&format!("{value:>width$}")),
            }
        }

        out
    }
}

impl Default for PatternLayout {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            segments: parse_segments(DEFAULT_PATTERN).unwrap_or_default(),
            timestamp_format: TimestampFormat::Iso8601Micros,
        }
    }
}

impl FromStr for PatternLayout {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Escape line breaks and tabs so one record stays on one line.
pub(crate) fn sanitize_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn parse_segments(pattern: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                literal.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                let mut spec = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => spec.push(ch),
                        None => {
                            return Err(LoggerError::config(
                                "pattern",
                                format!("unterminated placeholder in '{pattern}'"),
                            ))
                        }
                    }
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(parse_placeholder(&spec)?);
            }
            '}' => {
                return Err(LoggerError::config(
                    "pattern",
                    format!("unmatched '}}' in '{pattern}'"),
                ))
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

fn parse_placeholder(spec: &str) -> Result<Segment> {
    let (name, pad_spec) = match spec.split_once(':') {
        Some((name, pad)) => (name, Some(pad)),
        None => (spec, None),
    };

    let field = Field::parse(name)
        .ok_or_else(|| LoggerError::config("pattern", format!("unknown placeholder '{name}'")))?;

    let pad = match pad_spec {
        None => None,
        Some(pad) => {
            let (align, digits) = match pad.chars().next() {
                Some('<') => (Align::Left, &pad[1..]),
                Some('>') => (Align::Right, &pad[1..]),
                _ => (Align::Left, pad),
            };
            let width = digits.parse::<usize>().map_err(|_| {
                LoggerError::config("pattern", format!("invalid width '{pad}' for '{name}'"))
            })?;
            Some((align, width))
        }
    };

    Ok(Segment::Field { field, pad })
}
