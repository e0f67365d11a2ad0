//! Dynamic table record

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use super::Value;
use crate::error::FieldError;

static NULL: Value = Value::Null;

/// One row of a table, keyed by column.
///
/// Records hold cell values as a `HashMap<String, Value>`. Typed payloads are
/// mapped into records at the API boundary (see [`TableRow`](super::TableRow)),
/// so the table only ever sees this uniform shape.
///
/// # Example
///
/// ```
/// use equippro_lib::model::Record;
///
/// let record = Record::new()
///     .set("ticketId", 12i64)
///     .set("status", "waiting");
///
/// assert_eq!(record.get_string("status").unwrap(), Some("waiting"));
/// assert!(record.cell("technician").is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the cell value for a column key, or `Null` when absent.
    pub fn cell(&self, field: &str) -> &Value {
        self.fields.get(field).unwrap_or(&NULL)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value, returning the previous one.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "string",
                other.type_name(),
            )),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets an integer field value.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "int", other.type_name())),
        }
    }

    /// Gets a date field value.
    pub fn get_date(&self, field: &str) -> Result<Option<NaiveDate>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Date(d)) => Ok(Some(*d)),
            Some(other) => Err(FieldError::type_mismatch(field, "date", other.type_name())),
        }
    }

    /// Gets a nested record field value.
    pub fn get_record(&self, field: &str) -> Result<Option<&Record>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Record(r)) => Ok(Some(r.as_ref())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "record",
                other.type_name(),
            )),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
