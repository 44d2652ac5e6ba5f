//! Severity definitions

use super::error::{LoggerError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const EXPECTED_TOKENS: &str = "all|debug|info|warn|error|off";

/// Ordered log importance.
///
/// `Off` is only meaningful as a threshold ("suppress everything"); records
/// are never produced at that severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Severity {
    All = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl Severity {
    pub const ALL_VALUES: [Severity; 6] = [
        Severity::All,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Off,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::All => "all",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Off => "off",
        }
    }

    /// Whether a record at `requested` passes a logger whose threshold is `threshold`.
    #[inline]
    pub fn is_enabled(requested: Severity, threshold: Severity) -> bool {
        threshold != Severity::Off && requested != Severity::Off && requested >= threshold
    }

    /// Read a severity from a structured value. Anything other than one of
    /// the six canonical strings fails with `InvalidValue`.
    pub fn from_variant(value: &serde_json::Value) -> Result<Self> {
        value
            .as_str()
            .and_then(|token| token.parse().ok())
            .ok_or_else(|| LoggerError::invalid_value(value, EXPECTED_TOKENS))
    }

    pub fn to_variant(&self) -> serde_json::Value {
        serde_json::Value::String(self.to_str().to_string())
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::All | Severity::Off => BrightBlack,
            Severity::Debug => Blue,
            Severity::Info => Green,
            Severity::Warn => Yellow,
            Severity::Error => Red,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so width/alignment specs in layouts apply
        f.pad(self.to_str())
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(Severity::All),
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "off" => Ok(Severity::Off),
            _ => Err(LoggerError::InvalidValue {
                value: s.to_string(),
                expected: EXPECTED_TOKENS.to_string(),
            }),
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ordering() {
        assert!(Severity::All < Severity::Debug);
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Off);
    }

    #[test]
    fn test_canonical_tokens() {
        for severity in Severity::ALL_VALUES {
            assert_eq!(severity.to_string(), severity.to_str());
            assert_eq!(severity.to_str().parse::<Severity>().unwrap(), severity);
        }
    }

    #[test]
    fn test_parse_rejects_non_canonical() {
        for token in ["INFO", "warning", "trace", "", " info"] {
            let err = token.parse::<Severity>().unwrap_err();
            assert!(matches!(err, LoggerError::InvalidValue { .. }), "{token}");
        }
    }

    #[test]
    fn test_threshold_off_disables_everything() {
        for requested in Severity::ALL_VALUES {
            assert!(!Severity::is_enabled(requested, Severity::Off));
        }
    }

    #[test]
    fn test_threshold_all_enables_real_severities() {
        for requested in [Severity::Debug, Severity::Info, Severity::Warn, Severity::Error] {
            assert!(Severity::is_enabled(requested, Severity::All));
        }
        assert!(!Severity::is_enabled(Severity::Off, Severity::All));
    }

    #[test]
    fn test_threshold_comparison() {
        assert!(!Severity::is_enabled(Severity::Debug, Severity::Info));
        assert!(Severity::is_enabled(Severity::Info, Severity::Info));
        assert!(Severity::is_enabled(Severity::Error, Severity::Warn));
    }

    #[test]
    fn test_from_variant() {
        assert_eq!(Severity::from_variant(&json!("warn")).unwrap(), Severity::Warn);

        let err = Severity::from_variant(&json!(3)).unwrap_err();
        match err {
            LoggerError::InvalidValue { value, .. } => assert_eq!(value, "3"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&Severity::Error).unwrap();
        assert_eq!(json, "\"error\"");
        let parsed: Severity = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(parsed, Severity::Debug);
        assert!(serde_json::from_str::<Severity>("\"loud\"").is_err());
    }

    #[test]
    fn test_display_honours_width() {
        assert_eq!(format!("{:<5}|", Severity::Info), "info |");
    }
}
