//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A token could not be parsed into the expected enumeration
    #[error("Expected '{expected}', but got '{value}'")]
    InvalidValue { value: String, expected: String },

    /// A required field is absent from a structured value
    #[error("Missing required field '{field}'")]
    MissingField { field: String },

    /// A field is present but holds the wrong kind of value
    #[error("Field '{field}' expected {expected}, but got {value}")]
    TypeMismatch {
        field: String,
        expected: String,
        value: String,
    },

    /// A value's own rendering failed
    #[error("Render failure: {message}")]
    RenderFailure { message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Sink failure with sink name
    #[error("Sink '{sink}' failed: {message}")]
    SinkError { sink: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an invalid value error, rendering the offending value as JSON
    pub fn invalid_value(value: &serde_json::Value, expected: impl Into<String>) -> Self {
        LoggerError::InvalidValue {
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        LoggerError::MissingField {
            field: field.into(),
        }
    }

    /// Create a type mismatch error carrying the mismatched value
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        value: &serde_json::Value,
    ) -> Self {
        LoggerError::TypeMismatch {
            field: field.into(),
            expected: expected.into(),
            value: value.to_string(),
        }
    }

    /// Create a render failure error
    pub fn render(message: impl Into<String>) -> Self {
        LoggerError::RenderFailure {
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a sink error
    pub fn sink(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkError {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
