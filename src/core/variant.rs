//! Keyed access over `serde_json` objects
//!
//! Deserialization of records goes through [`ObjectView`], which separates the
//! membership test (`contains`) from typed extraction. Extraction never
//! coerces: a field of the wrong kind fails with the offending value attached.

use super::error::{LoggerError, Result};
use serde_json::{Map, Value};

/// Read-only view of a structured object.
#[derive(Debug, Clone, Copy)]
pub struct ObjectView<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> ObjectView<'a> {
    /// View `value` as an object. `what` names the value in the error.
    pub fn new(value: &'a Value, what: &str) -> Result<Self> {
        value
            .as_object()
            .map(|map| Self { map })
            .ok_or_else(|| LoggerError::type_mismatch(what, "an object", value))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn require(&self, key: &str) -> Result<&'a Value> {
        self.map
            .get(key)
            .ok_or_else(|| LoggerError::missing_field(key))
    }

    pub fn str(&self, key: &str) -> Result<&'a str> {
        let value = self.require(key)?;
        value
            .as_str()
            .ok_or_else(|| LoggerError::type_mismatch(key, "a string", value))
    }

    pub fn u64(&self, key: &str) -> Result<u64> {
        let value = self.require(key)?;
        value
            .as_u64()
            .ok_or_else(|| LoggerError::type_mismatch(key, "an unsigned integer", value))
    }

    /// Absent is `None`; present but not a string is an error.
    pub fn optional_str(&self, key: &str) -> Result<Option<&'a str>> {
        if self.contains(key) {
            self.str(key).map(Some)
        } else {
            Ok(None)
        }
    }
}
