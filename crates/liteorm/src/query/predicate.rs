//! WHERE/HAVING predicates and the argument shapes accepted by `where`.

use crate::ident::Ident;
use crate::query::Builder;
use crate::value::{Expression, Value};
use std::fmt;

/// Comparison operators accepted by `where`/`having`.
///
/// Any other operator token passed to `where` is reinterpreted as the value.
pub const OPERATORS: &[&str] = &[
    "=",
    "<",
    ">",
    "<=",
    ">=",
    "<>",
    "!=",
    "<=>",
    "like",
    "like binary",
    "not like",
    "ilike",
    "&",
    "|",
    "^",
    "<<",
    ">>",
    "rlike",
    "not rlike",
    "regexp",
    "not regexp",
    "~",
    "~*",
    "!~",
    "!~*",
    "similar to",
    "not similar to",
    "not ilike",
    "~~*",
    "!~~*",
];

/// Whether `operator` belongs to [`OPERATORS`] (ASCII case-insensitive).
pub fn is_operator(operator: &str) -> bool {
    OPERATORS.iter().any(|op| op.eq_ignore_ascii_case(operator))
}

/// Boolean connector placed before a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connector {
    #[default]
    And,
    Or,
}

impl Connector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a statement's WHERE or HAVING list.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// `column op ?`
    Basic {
        column: Ident,
        operator: String,
        value: Value,
        connector: Connector,
    },
    /// Literal SQL.
    Raw { sql: String, connector: Connector },
    /// `column [NOT] BETWEEN ? AND ?`
    Between {
        column: Ident,
        low: Value,
        high: Value,
        negated: bool,
        connector: Connector,
    },
    /// Parenthesized group built from another statement's wheres.
    Nested {
        query: Box<Builder>,
        connector: Connector,
    },
    /// `column op (subquery)`
    Sub {
        column: Ident,
        operator: String,
        query: Box<Builder>,
        connector: Connector,
    },
    /// `[NOT] EXISTS (subquery)`
    Exists {
        query: Box<Builder>,
        negated: bool,
        connector: Connector,
    },
    /// `column [NOT] IN (?, ...)`
    In {
        column: Ident,
        values: Vec<Value>,
        negated: bool,
        connector: Connector,
    },
    /// `column [NOT] IN (subquery)`
    InSub {
        column: Ident,
        query: Box<Builder>,
        negated: bool,
        connector: Connector,
    },
    /// `column IS [NOT] NULL`
    Null {
        column: Ident,
        negated: bool,
        connector: Connector,
    },
}

impl Predicate {
    pub fn connector(&self) -> Connector {
        match self {
            Predicate::Basic { connector, .. }
            | Predicate::Raw { connector, .. }
            | Predicate::Between { connector, .. }
            | Predicate::Nested { connector, .. }
            | Predicate::Sub { connector, .. }
            | Predicate::Exists { connector, .. }
            | Predicate::In { connector, .. }
            | Predicate::InSub { connector, .. }
            | Predicate::Null { connector, .. } => *connector,
        }
    }
}

/// Right-hand side of a `where`.
#[derive(Debug, Clone)]
pub enum Operand {
    Value(Value),
    /// Array payload; rejected by the generic `where` path.
    List(Vec<Value>),
    Query(Box<Builder>),
}

impl Operand {
    /// The text of a string operand, used for columns and operators in tuples.
    pub(crate) fn as_text(&self) -> Option<&str> {
        match self {
            Operand::Value(Value::Text(s)) => Some(s),
            _ => None,
        }
    }
}

macro_rules! impl_operand_from_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand {
                fn from(v: $t) -> Self {
                    Operand::Value(Value::from(v))
                }
            }
        )*
    };
}

impl_operand_from_value!(
    i8, i16, i32, i64, u8, u16, u32, f32, f64, bool, &str, String, &String, Expression,
    uuid::Uuid, chrono::NaiveDate, chrono::NaiveDateTime, chrono::DateTime<chrono::Utc>
);

/// JSON arrays become [`Operand::List`]; everything else goes through [`Value`].
impl From<serde_json::Value> for Operand {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Array(items) => {
                Operand::List(items.into_iter().map(Value::from).collect())
            }
            other => Operand::Value(Value::from(other)),
        }
    }
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Operand::Value(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Operand {
    fn from(v: Option<T>) -> Self {
        Operand::Value(Value::from(v))
    }
}

impl From<Vec<Value>> for Operand {
    fn from(v: Vec<Value>) -> Self {
        Operand::List(v)
    }
}

impl From<Builder> for Operand {
    fn from(q: Builder) -> Self {
        Operand::Query(Box::new(q))
    }
}

/// Right-hand side of `where_in`: a scalar list or a subquery.
#[derive(Debug, Clone)]
pub enum InValues {
    List(Vec<Value>),
    Query(Box<Builder>),
}

impl<T: Into<Value>> From<Vec<T>> for InValues {
    fn from(values: Vec<T>) -> Self {
        InValues::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for InValues {
    fn from(values: [T; N]) -> Self {
        InValues::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<Builder> for InValues {
    fn from(q: Builder) -> Self {
        InValues::Query(Box::new(q))
    }
}

/// The input shapes accepted by `where`, resolved once at the call site.
#[derive(Debug, Clone)]
pub enum Condition {
    /// Equality per entry, in iteration order, joined with AND.
    Map(Vec<(String, Operand)>),
    /// Another statement's wheres as one parenthesized group.
    Nested(Box<Builder>),
    /// `[column, operator, value]` triples as one parenthesized group.
    Tuples(Vec<Vec<Operand>>),
    /// A single column with positional operator/value.
    Column {
        column: Ident,
        operator: Option<String>,
        value: Option<Operand>,
    },
}

impl Condition {
    /// Build a map condition from `(column, value)` pairs.
    pub fn map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Operand>,
    {
        Condition::Map(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<Builder> for Condition {
    fn from(q: Builder) -> Self {
        Condition::Nested(Box::new(q))
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Condition {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Condition::Map(map.into_iter().map(|(k, v)| (k, Operand::from(v))).collect())
    }
}

impl From<Vec<Vec<Operand>>> for Condition {
    fn from(tuples: Vec<Vec<Operand>>) -> Self {
        Condition::Tuples(tuples)
    }
}
