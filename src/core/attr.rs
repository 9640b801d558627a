//! Key/value attributes attached to records and handlers

use super::value::{AnyValue, Value};
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// A single key/value pair
///
/// The key may be empty only for a group, in which case the group's children
/// are inlined into the enclosing scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Value::String(value.into()))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, Value::Bool(value))
    }

    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, Value::Int(value))
    }

    pub fn uint(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, Value::Uint(value))
    }

    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, Value::Float(value))
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, Value::Duration(value))
    }

    pub fn time(key: impl Into<String>, value: DateTime<Utc>) -> Self {
        Self::new(key, Value::Time(value))
    }

    /// Attribute holding an arbitrary `Debug` object
    pub fn any<T: AnyValue>(key: impl Into<String>, value: T) -> Self {
        Self::new(key, Value::any(value))
    }

    /// Named group of child attributes
    pub fn group(key: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self::new(key, Value::Group(attrs))
    }

    /// Attribute whose value is computed only when the record is printed
    pub fn lazy<F>(key: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::new(key, Value::lazy(f))
    }

    /// True for the zero attribute (empty key and null value), which is never printed
    pub fn is_empty(&self) -> bool {
        self.key.is_empty() && self.value.is_null()
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Attr {
    fn from((key, value): (K, V)) -> Self {
        Attr::new(key, value)
    }
}
