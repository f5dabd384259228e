//! Post-execution hooks.

use crate::client::Execution;
use crate::query::Builder;
use crate::row::Row;
use std::fmt::Debug;

/// Reshapes results after the storage collaborator has answered.
pub trait Processor: Debug + Send + Sync {
    /// Post-process the rows of a SELECT.
    fn process_select(&self, _query: &Builder, rows: Vec<Row>) -> Vec<Row> {
        rows
    }

    /// Extract the identifier assigned by an INSERT.
    fn process_insert_get_id(&self, execution: &Execution) -> Option<i64> {
        execution.insert_id
    }
}

/// Passes results through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProcessor;

impl Processor for DefaultProcessor {}

/// SQLite reports a rowid of 0 when nothing was inserted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteProcessor;

impl Processor for SqliteProcessor {
    fn process_insert_get_id(&self, execution: &Execution) -> Option<i64> {
        execution.insert_id.filter(|id| *id != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_zero_rowid() {
        assert_eq!(SqliteProcessor.process_insert_get_id(&Execution::inserted(0)), None);
        assert_eq!(SqliteProcessor.process_insert_get_id(&Execution::inserted(9)), Some(9));
        assert_eq!(DefaultProcessor.process_insert_get_id(&Execution::inserted(0)), Some(0));
    }
}
