//! Log record: a call context plus the message text

use super::call_context::CallContext;
use super::error::Result;
use super::variant::ObjectView;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Byte cap applied by [`LogRecord::limited_message`].
pub const MESSAGE_LIMIT: usize = 1024;

const ELLIPSIS: &str = "...";

/// The unit handed to a logger's backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    context: CallContext,
    message: String,
}

impl LogRecord {
    pub fn new(context: CallContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    /// Rebuild a record from `{ "context": {..}, "msg": ".." }`.
    pub fn from_variant(value: &Value) -> Result<Self> {
        let obj = ObjectView::new(value, "record")?;
        let context = CallContext::from_variant(obj.require("context")?)?;
        let message = obj.str("msg")?.to_string();
        Ok(Self { context, message })
    }

    pub fn to_variant(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("context".to_string(), self.context.to_variant());
        obj.insert("msg".to_string(), Value::String(self.message.clone()));
        Value::Object(obj)
    }

    /// Serialize to a single-line JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_variant())?)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_variant(&value)
    }

    pub fn context(&self) -> &CallContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut CallContext {
        &mut self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First [`MESSAGE_LIMIT`] bytes of the message followed by `"..."`.
    ///
    /// The suffix is always appended, even for short messages. A cut that
    /// would split a UTF-8 sequence moves back to the previous char boundary.
    pub fn limited_message(&self) -> String {
        let mut end = self.message.len().min(MESSAGE_LIMIT);
        while !self.message.is_char_boundary(end) {
            end -= 1;
        }
        let mut limited = String::with_capacity(end + ELLIPSIS.len());
        limited.push_str(&self.message[..end]);
        limited.push_str(ELLIPSIS);
        limited
    }
}

impl Serialize for LogRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_variant().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LogRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        LogRecord::from_variant(&value).map_err(serde::de::Error::custom)
    }
}
