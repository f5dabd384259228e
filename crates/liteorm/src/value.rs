//! Bound values and raw SQL expressions.
//!
//! A [`Value`] is anything that can sit behind a placeholder. The one exception
//! is [`Value::Raw`], which carries an [`Expression`]: literal SQL that the
//! grammar inserts verbatim and that never becomes a binding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal SQL text exempt from quoting and parameter binding.
///
/// # Example
/// ```ignore
/// use liteorm::raw;
///
/// let q = manager.table("users").add_select(raw("COUNT(*) AS total"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Expression(String);

impl Expression {
    /// Wrap a SQL fragment.
    pub fn new(sql: impl Into<String>) -> Self {
        Expression(sql.into())
    }

    /// The wrapped SQL text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shorthand for [`Expression::new`].
pub fn raw(sql: impl Into<String>) -> Expression {
    Expression::new(sql)
}

/// A value bound to a placeholder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
    /// Rendered verbatim; never bound.
    Raw(Expression),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Value::Raw(_))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Bool(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            // SQLite has no boolean storage class.
            Value::Int(0) => Some(false),
            Value::Int(1) => Some(true),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
            Value::Raw(_) => "raw",
        }
    }
}

macro_rules! impl_value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<Expression> for Value {
    fn from(v: Expression) -> Self {
        Value::Raw(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<uuid::Uuid> for Value {
    fn from(v: uuid::Uuid) -> Self {
        Value::Text(v.hyphenated().to_string())
    }
}

impl From<chrono::NaiveDate> for Value {
    fn from(v: chrono::NaiveDate) -> Self {
        Value::Text(v.format("%Y-%m-%d").to_string())
    }
}

impl From<chrono::NaiveDateTime> for Value {
    fn from(v: chrono::NaiveDateTime) -> Self {
        Value::Text(v.format("%Y-%m-%d %H:%M:%S%.f").to_string())
    }
}

impl From<chrono::DateTime<chrono::Utc>> for Value {
    fn from(v: chrono::DateTime<chrono::Utc>) -> Self {
        Value::Text(v.to_rfc3339())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::Text(s),
            // Arrays and objects are stored as JSON text.
            other => Value::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_is_structural() {
        let text = Value::from("COUNT(*)");
        let expr = Value::from(raw("COUNT(*)"));
        assert!(!text.is_raw());
        assert!(expr.is_raw());
        assert_ne!(text, expr);
    }

    #[test]
    fn test_option_maps_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(5i32)), Value::Int(5));
    }

    #[test]
    fn test_json_conversion() {
        assert_eq!(Value::from(serde_json::json!(3)), Value::Int(3));
        assert_eq!(Value::from(serde_json::json!(1.5)), Value::Float(1.5));
        assert_eq!(Value::from(serde_json::json!("a")), Value::Text("a".into()));
        assert_eq!(
            Value::from(serde_json::json!({"k": 1})),
            Value::Text(r#"{"k":1}"#.into())
        );
    }

    #[test]
    fn test_datetime_as_text() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date");
        assert_eq!(Value::from(date), Value::Text("2024-03-09".into()));
    }

    #[test]
    fn test_sqlite_bool() {
        assert_eq!(Value::Int(1).as_bool(), Some(true));
        assert_eq!(Value::Int(2).as_bool(), None);
    }
}
