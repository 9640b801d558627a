//! Typed attribute values and their textual rendering
//!
//! `Value` is a closed set of kinds. Rendering through [`fmt::Display`] is
//! total: every kind, including arbitrary objects and lazy thunks, produces
//! text without failing.

use super::attr::Attr;
use chrono::{DateTime, Utc};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Lazy values returning further lazy values are forced at most this many times
const MAX_LAZY_DEPTH: usize = 100;

/// Arbitrary object stored in a [`Value::Any`]
///
/// Implemented for every `Debug + Send + Sync + 'static` type; `as_any`
/// allows hooks to recognize concrete types.
pub trait AnyValue: fmt::Debug + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

impl<T: fmt::Debug + Send + Sync + 'static> AnyValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A thunk producing a value on demand
pub trait LazyValue: Send + Sync {
    fn resolve(&self) -> Value;
}

impl<F> LazyValue for F
where
    F: Fn() -> Value + Send + Sync,
{
    fn resolve(&self) -> Value {
        self()
    }
}

/// Discriminant of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    String,
    Int,
    Uint,
    Float,
    Duration,
    Time,
    Any,
    Group,
    Lazy,
}

#[derive(Clone, Default)]
pub enum Value {
    /// The zero value
    #[default]
    Null,
    Bool(bool),
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Duration(Duration),
    Time(DateTime<Utc>),
    Any(Arc<dyn AnyValue>),
    Group(Vec<Attr>),
    Lazy(Arc<dyn LazyValue>),
}

impl Value {
    /// Wrap an arbitrary object
    pub fn any<T: AnyValue>(object: T) -> Self {
        Value::Any(Arc::new(object))
    }

    /// Wrap a thunk evaluated when the record is printed
    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Value::Lazy(Arc::new(f))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::String(_) => ValueKind::String,
            Value::Int(_) => ValueKind::Int,
            Value::Uint(_) => ValueKind::Uint,
            Value::Float(_) => ValueKind::Float,
            Value::Duration(_) => ValueKind::Duration,
            Value::Time(_) => ValueKind::Time,
            Value::Any(_) => ValueKind::Any,
            Value::Group(_) => ValueKind::Group,
            Value::Lazy(_) => ValueKind::Lazy,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Value::Group(_))
    }

    /// Borrow the object inside a [`Value::Any`] as a concrete type
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        match self {
            Value::Any(object) => {
                let object: &dyn AnyValue = object.as_ref();
                object.as_any().downcast_ref::<T>()
            }
            _ => None,
        }
    }

    /// Force lazy values until a concrete value is produced
    ///
    /// Non-lazy values are returned unchanged. A chain of thunks longer than
    /// the internal bound resolves to an error marker string.
    pub fn resolve(self) -> Value {
        let mut value = self;
        for _ in 0..MAX_LAZY_DEPTH {
            match value {
                Value::Lazy(thunk) => value = thunk.resolve(),
                resolved => return resolved,
            }
        }
        match value {
            Value::Lazy(_) => Value::String("!LAZY_VALUE_DEPTH_EXCEEDED".to_string()),
            resolved => resolved,
        }
    }

    /// Multi-line structural dump used by the pretty printer
    pub fn pretty(&self) -> String {
        match self {
            Value::Any(object) => format!("{:#?}", object),
            Value::Group(attrs) => {
                let fields: Vec<String> = attrs
                    .iter()
                    .map(|a| format!("    {}: {},", a.key, a.value.pretty().replace('\n', "\n    ")))
                    .collect();
                if fields.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{\n{}\n}}", fields.join("\n"))
                }
            }
            Value::Lazy(thunk) => thunk.resolve().resolve().pretty(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "<nil>"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Duration(d) => write!(f, "{:?}", d),
            Value::Time(t) => write!(f, "{}", t.to_rfc3339()),
            Value::Any(object) => write!(f, "{:?}", object),
            Value::Group(attrs) => {
                write!(f, "[")?;
                for (i, attr) in attrs.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", attr)?;
                }
                write!(f, "]")
            }
            Value::Lazy(thunk) => write!(f, "{}", thunk.resolve().resolve()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Uint(u) => f.debug_tuple("Uint").field(u).finish(),
            Value::Float(fl) => f.debug_tuple("Float").field(fl).finish(),
            Value::Duration(d) => f.debug_tuple("Duration").field(d).finish(),
            Value::Time(t) => f.debug_tuple("Time").field(t).finish(),
            Value::Any(object) => f.debug_tuple("Any").field(object).finish(),
            Value::Group(attrs) => f.debug_tuple("Group").field(attrs).finish(),
            Value::Lazy(_) => write!(f, "Lazy(..)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Duration(a), Value::Duration(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::Any(a), Value::Any(b)) => Arc::ptr_eq(a, b),
            (Value::Group(a), Value::Group(b)) => a == b,
            (Value::Lazy(a), Value::Lazy(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Uint(u)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::Uint(u as u64)
    }
}

impl From<usize> for Value {
    fn from(u: usize) -> Self {
        Value::Uint(u as u64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t)
    }
}

impl From<Vec<Attr>> for Value {
    fn from(attrs: Vec<Attr>) -> Self {
        Value::Group(attrs)
    }
}
