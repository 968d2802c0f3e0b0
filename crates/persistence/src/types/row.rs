//! Result rows and value decoding.
//!
//! Executors hand back [`Row`]s: ordered, labelled tuples of [`Value`]s.
//! [`FromValue`] decodes one cell and [`FromRow`] decodes a whole row into an
//! entity, DTO or tuple.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};

/// A dynamically typed scalar as stored by the datastore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Real(f64),
    /// Text value.
    Text(String),
}

impl Value {
    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the name of the value's storage class.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Value::Real(r)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Integer(i64::from(b))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Decodes a single cell.
pub trait FromValue: Sized {
    /// Decodes `value`, read from `column`, into `Self`.
    fn from_value(value: &Value, column: &str) -> QueryResult<Self>;
}

fn mismatch(column: &str, expected: &'static str, value: &Value) -> QueryError {
    QueryError::TypeMismatch {
        column: column.to_string(),
        expected,
        found: value.type_name(),
    }
}

impl FromValue for Value {
    fn from_value(value: &Value, _column: &str) -> QueryResult<Self> {
        Ok(value.clone())
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value, column: &str) -> QueryResult<Self> {
        match value {
            Value::Integer(i) => Ok(*i),
            other => Err(mismatch(column, "integer", other)),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value, column: &str) -> QueryResult<Self> {
        let wide = i64::from_value(value, column)?;
        i32::try_from(wide).map_err(|_| mismatch(column, "32-bit integer", value))
    }
}

impl FromValue for u64 {
    fn from_value(value: &Value, column: &str) -> QueryResult<Self> {
        let wide = i64::from_value(value, column)?;
        u64::try_from(wide).map_err(|_| mismatch(column, "unsigned integer", value))
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value, column: &str) -> QueryResult<Self> {
        match value {
            Value::Real(r) => Ok(*r),
            Value::Integer(i) => Ok(*i as f64),
            other => Err(mismatch(column, "real", other)),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value, column: &str) -> QueryResult<Self> {
        Ok(i64::from_value(value, column)? != 0)
    }
}

impl FromValue for String {
    fn from_value(value: &Value, column: &str) -> QueryResult<Self> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            other => Err(mismatch(column, "text", other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value, column: &str) -> QueryResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other, column).map(Some),
        }
    }
}

/// One result row: column labels paired with values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    /// Creates a row. Labels and values are paired positionally.
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Column labels.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Raw values.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Raw value at `index`, if in range.
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Decodes the cell at `index`.
    pub fn get<T: FromValue>(&self, index: usize) -> QueryResult<T> {
        let value = self
            .values
            .get(index)
            .ok_or(QueryError::ColumnOutOfRange {
                index,
                width: self.values.len(),
            })?;
        let label = self.columns.get(index).map(String::as_str).unwrap_or("?");
        T::from_value(value, label)
    }

    /// Decodes the first cell labelled `name`.
    pub fn get_named<T: FromValue>(&self, name: &str) -> QueryResult<T> {
        let index = self
            .columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| QueryError::UnknownColumn {
                name: name.to_string(),
            })?;
        self.get(index)
    }
}

/// Decodes a whole row.
pub trait FromRow: Sized {
    /// Builds `Self` from `row`.
    fn from_row(row: &Row) -> QueryResult<Self>;
}

impl FromRow for Row {
    fn from_row(row: &Row) -> QueryResult<Self> {
        Ok(row.clone())
    }
}

impl<A: FromValue, B: FromValue> FromRow for (A, B) {
    fn from_row(row: &Row) -> QueryResult<Self> {
        Ok((row.get(0)?, row.get(1)?))
    }
}
