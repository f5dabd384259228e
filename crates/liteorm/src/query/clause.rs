//! Clause payloads stored on a [`Builder`]: ordering, unions, aggregates,
//! locks and INSERT/UPDATE records.

use crate::error::{OrmError, OrmResult};
use crate::ident::Ident;
use crate::query::Builder;
use crate::value::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// `"asc"` (any case) is ascending; anything else is descending.
impl From<&str> for Direction {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("asc") {
            Direction::Asc
        } else {
            Direction::Desc
        }
    }
}

/// One ORDER BY entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Order {
    Column { column: Ident, direction: Direction },
    /// Accepted by the builder; the grammar refuses to render it.
    Raw { sql: String },
}

/// A UNION member.
#[derive(Debug, Clone)]
pub struct Union {
    pub query: Box<Builder>,
    pub all: bool,
}

/// Aggregate functions understood by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    Count,
    Min,
    Max,
    Sum,
    Avg,
}

impl AggregateFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Avg => "AVG",
        }
    }
}

impl FromStr for AggregateFunction {
    type Err = OrmError;

    fn from_str(s: &str) -> OrmResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "count" => Ok(AggregateFunction::Count),
            "min" => Ok(AggregateFunction::Min),
            "max" => Ok(AggregateFunction::Max),
            "sum" => Ok(AggregateFunction::Sum),
            "avg" => Ok(AggregateFunction::Avg),
            other => Err(OrmError::construction(format!(
                "unrecognized aggregate function `{other}`"
            ))),
        }
    }
}

/// `SELECT <FUNC>(<columns>) AS aggregate`
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub function: AggregateFunction,
    pub columns: Vec<Ident>,
}

/// Row lock mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lock {
    Update,
    Shared,
    Raw(String),
}

/// Column/value pairs for INSERT and UPDATE. Keys iterate in sorted order,
/// which keeps column lists and value tuples aligned.
pub type Record = BTreeMap<String, Value>;

/// Build a [`Record`] from `(column, value)` pairs.
pub fn record<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Record
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// Input to `insert`: one record or many.
#[derive(Debug, Clone, PartialEq)]
pub enum Records {
    One(Record),
    Many(Vec<Record>),
}

impl Records {
    pub fn into_vec(self) -> Vec<Record> {
        match self {
            Records::One(record) => vec![record],
            Records::Many(records) => records,
        }
    }
}

impl From<Record> for Records {
    fn from(record: Record) -> Self {
        Records::One(record)
    }
}

impl From<Vec<Record>> for Records {
    fn from(records: Vec<Record>) -> Self {
        Records::Many(records)
    }
}
