//! Timestamp rendering and the wire form of record timestamps
//!
//! Layouts render timestamps through [`TimestampFormat`]. Serialized call
//! contexts always carry ISO 8601 with microseconds; reading accepts that
//! form, any RFC 3339 string, or integer microseconds since the Unix epoch.

use super::error::{LoggerError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format options for rendered output
///
/// # Examples
///
/// ```
/// use rust_structured_logger::core::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// let timestamp = format.format(&Utc::now());
/// assert!(timestamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Unix timestamp in microseconds: `1736332245123456`
    UnixMicros,

    /// Custom strftime format, e.g. `"%d/%b/%Y:%H:%M:%S %z"`
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}

/// Wire form of a record timestamp.
pub fn to_variant(datetime: &DateTime<Utc>) -> serde_json::Value {
    serde_json::Value::String(datetime.to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// Read a record timestamp written by [`to_variant`] or by another producer.
pub fn from_variant(field: &str, value: &serde_json::Value) -> Result<DateTime<Utc>> {
    if let Some(text) = value.as_str() {
        return DateTime::parse_from_rfc3339(text)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|_| LoggerError::type_mismatch(field, "an RFC 3339 time point", value));
    }
    value
        .as_i64()
        .and_then(DateTime::<Utc>::from_timestamp_micros)
        .ok_or_else(|| LoggerError::type_mismatch(field, "a time point", value))
}
