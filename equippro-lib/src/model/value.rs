//! Value enum for dynamic cell values

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

/// A dynamic value held by one cell of a [`Record`](super::Record).
///
/// # Type Mapping
///
/// | JSON / API type | Rust Variant |
/// |-----------------|--------------|
/// | null, absent | `Null` |
/// | boolean | `Bool` |
/// | integer | `Int` |
/// | number | `Float` |
/// | `[y, m, d]` date | `Date` |
/// | string | `String` |
/// | object | `Record` |
///
/// # Example
///
/// ```
/// use equippro_lib::model::Value;
///
/// let status = Value::from("open");
/// let id = Value::from(42i64);
/// let empty = Value::Null;
/// assert_eq!(id.as_text(), "42");
/// assert_eq!(empty.as_text(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Calendar date without time zone.
    Date(NaiveDate),
    /// String value.
    String(String),
    /// Nested object.
    Record(Box<super::Record>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Date(_) => "date",
            Value::String(_) => "string",
            Value::Record(_) => "record",
        }
    }

    /// Returns the canonical text of this value, used for matching and as the
    /// default cell rendering.
    ///
    /// Null and nested records have no text.
    pub fn as_text(&self) -> String {
        match self {
            Value::Null | Value::Record(_) => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::String(s) => s.clone(),
        }
    }

    /// Total order used by column sorting.
    ///
    /// Values of different kinds compare by kind (null first). Integers and
    /// floats share a kind and compare numerically. Strings compare
    /// case-insensitively, falling back to byte order on ties.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).total_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.total_cmp(&(*b as f64)),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (Value::Record(_), Value::Record(_)) => Ordering::Equal,
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::Date(_) => 3,
            Value::String(_) => 4,
            Value::Record(_) => 5,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<super::Record> for Value {
    fn from(v: super::Record) -> Self {
        Value::Record(Box::new(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}
