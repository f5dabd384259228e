//! Row mapping traits and utilities

use crate::error::{OrmError, OrmResult};
use crate::value::Value;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// A result row returned by the storage collaborator, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: BTreeMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, replacing any previous value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(column.into(), value.into());
    }

    /// Builder-style [`Row::insert`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Get a typed column value.
    pub fn try_get<T: FromValue>(&self, column: &str) -> OrmResult<T> {
        let value = self
            .columns
            .get(column)
            .ok_or_else(|| OrmError::decode(column, "column not present in row"))?;
        T::from_value(value).ok_or_else(|| {
            OrmError::decode(
                column,
                format!("cannot decode {} as {}", value.type_name(), std::any::type_name::<T>()),
            )
        })
    }

    /// Deserialize the whole row into a serde type.
    pub fn decode<T: DeserializeOwned>(&self) -> OrmResult<T> {
        let map: serde_json::Map<String, serde_json::Value> = self
            .columns
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
            .collect();
        Ok(serde_json::from_value(serde_json::Value::Object(map))?)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Value::from(*f),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Blob(bytes) => serde_json::Value::from(bytes.clone()),
            Value::Raw(expr) => serde_json::Value::String(expr.as_str().to_string()),
        }
    }
}

/// Trait for converting a single column value into a Rust type.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64().and_then(|v| i32::try_from(v).ok())
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            Some(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

/// Trait for converting a result row into a Rust type.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> OrmResult<Self>;
}

impl FromRow for Row {
    fn from_row(row: &Row) -> OrmResult<Self> {
        Ok(row.clone())
    }
}
