//! Call-site context: where, when and by whom a record was produced

use super::error::Result;
use super::identity;
use super::severity::Severity;
use super::timestamp;
use super::variant::ObjectView;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

const CONTEXT_SEPARATOR: &str = " -> ";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Inner {
    severity: Severity,
    file: String,
    line: u64,
    method: String,
    thread_name: String,
    task_name: String,
    host_name: String,
    timestamp: DateTime<Utc>,
    context: String,
}

/// Immutable call-site metadata.
///
/// Clones share one allocation. The only mutation, [`append_context`], is
/// copy-on-write: it never affects other clones.
///
/// [`append_context`]: CallContext::append_context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    inner: Arc<Inner>,
}

/// Final component of `path`, accepting either separator.
pub(crate) fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

impl CallContext {
    /// Capture a context at the current instant on the calling thread.
    pub fn new(severity: Severity, file: &str, line: u64, method: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                severity,
                file: basename(file).to_string(),
                line,
                method: method.into(),
                thread_name: identity::thread_name(),
                task_name: identity::task_name(),
                host_name: identity::host_name(),
                timestamp: Utc::now().trunc_subsecs(6),
                context: String::new(),
            }),
        }
    }

    /// Rebuild a context from its serialized form.
    ///
    /// `task_name` and `context` are optional and default to empty; every other
    /// field is required.
    pub fn from_variant(value: &Value) -> Result<Self> {
        let obj = ObjectView::new(value, "context")?;

        let severity = Severity::from_variant(obj.require("level")?)?;
        let file = obj.str("file")?.to_string();
        let line = obj.u64("line")?;
        let method = obj.str("method")?.to_string();
        let host_name = obj.str("hostname")?.to_string();
        let thread_name = obj.str("thread_name")?.to_string();
        let task_name = obj.optional_str("task_name")?.unwrap_or_default().to_string();
        let timestamp = timestamp::from_variant("timestamp", obj.require("timestamp")?)?;
        let context = obj.optional_str("context")?.unwrap_or_default().to_string();

        Ok(Self {
            inner: Arc::new(Inner {
                severity,
                file,
                line,
                method,
                thread_name,
                task_name,
                host_name,
                timestamp,
                context,
            }),
        })
    }

    pub fn to_variant(&self) -> Value {
        let inner = &*self.inner;
        let mut obj = Map::new();
        obj.insert("level".to_string(), inner.severity.to_variant());
        obj.insert("file".to_string(), Value::String(inner.file.clone()));
        obj.insert("line".to_string(), Value::from(inner.line));
        obj.insert("method".to_string(), Value::String(inner.method.clone()));
        obj.insert("hostname".to_string(), Value::String(inner.host_name.clone()));
        obj.insert("thread_name".to_string(), Value::String(inner.thread_name.clone()));
        obj.insert("timestamp".to_string(), timestamp::to_variant(&inner.timestamp));
        if !inner.task_name.is_empty() {
            obj.insert("task_name".to_string(), Value::String(inner.task_name.clone()));
        }
        if !inner.context.is_empty() {
            obj.insert("context".to_string(), Value::String(inner.context.clone()));
        }
        Value::Object(obj)
    }

    /// Extend the context trail: `"a"`, then `"a -> b"`, and so on.
    pub fn append_context(&mut self, s: &str) {
        let inner = Arc::make_mut(&mut self.inner);
        if !inner.context.is_empty() {
            inner.context.push_str(CONTEXT_SEPARATOR);
        }
        inner.context.push_str(s);
    }

    #[must_use]
    pub fn with_task_name(mut self, name: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.inner).task_name = name.into();
        self
    }

    #[must_use]
    pub fn with_host_name(mut self, name: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.inner).host_name = name.into();
        self
    }

    /// Override the capture time. Kept at microsecond resolution, the
    /// precision of the wire form.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        Arc::make_mut(&mut self.inner).timestamp = timestamp.trunc_subsecs(6);
        self
    }

    pub fn severity(&self) -> Severity {
        self.inner.severity
    }

    pub fn file(&self) -> &str {
        &self.inner.file
    }

    pub fn line(&self) -> u64 {
        self.inner.line
    }

    pub fn method(&self) -> &str {
        &self.inner.method
    }

    pub fn thread_name(&self) -> &str {
        &self.inner.thread_name
    }

    pub fn task_name(&self) -> &str {
        &self.inner.task_name
    }

    pub fn host_name(&self) -> &str {
        &self.inner.host_name
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.inner.timestamp
    }

    pub fn context(&self) -> &str {
        &self.inner.context
    }
}

impl fmt::Display for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {}:{} {}",
            self.inner.thread_name, self.inner.file, self.inner.line, self.inner.method
        )
    }
}

impl Serialize for CallContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_variant().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CallContext {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        CallContext::from_variant(&value).map_err(serde::de::Error::custom)
    }
}
