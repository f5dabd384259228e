//! Storage collaborator seam.
//!
//! The core never opens connections. Terminal operations on a
//! [`Builder`](crate::Builder) hand compiled SQL plus its ordered bindings to an
//! [`Executor`] and await exactly one response.

use crate::config::LogConfig;
use crate::error::OrmResult;
use crate::row::Row;
use crate::value::Value;

/// What the storage collaborator reports back for one statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Execution {
    /// Rows produced by the statement (empty for writes).
    pub rows: Vec<Row>,
    /// Identifier assigned to the last inserted row, if any.
    pub insert_id: Option<i64>,
    /// Number of rows written.
    pub rows_affected: u64,
}

impl Execution {
    pub fn rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn affected(rows_affected: u64) -> Self {
        Self {
            rows_affected,
            ..Self::default()
        }
    }

    pub fn inserted(insert_id: i64) -> Self {
        Self {
            insert_id: Some(insert_id),
            rows_affected: 1,
            ..Self::default()
        }
    }
}

/// Executes one SQL statement against the underlying engine.
///
/// `bindings` are positional: the n-th value fills the n-th placeholder in
/// `sql`. Pooling, reconnection, retries and transactions are the
/// implementor's concern.
pub trait Executor: Send + Sync {
    fn execute(
        &self,
        sql: &str,
        bindings: &[Value],
    ) -> impl std::future::Future<Output = OrmResult<Execution>> + Send;
}

impl<E: Executor> Executor for &E {
    fn execute(
        &self,
        sql: &str,
        bindings: &[Value],
    ) -> impl std::future::Future<Output = OrmResult<Execution>> + Send {
        (**self).execute(sql, bindings)
    }
}

/// Statement kind, used as a log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Truncate,
}

/// Log, execute, and propagate any failure unchanged.
pub(crate) async fn run(
    conn: &impl Executor,
    log: &LogConfig,
    kind: StatementKind,
    sql: &str,
    bindings: &[Value],
) -> OrmResult<Execution> {
    if log.enabled {
        tracing::debug!(
            target: "liteorm.sql",
            kind = ?kind,
            param_count = bindings.len(),
            sql = %log.truncate(sql),
            "executing statement"
        );
    }

    match conn.execute(sql, bindings).await {
        Ok(execution) => Ok(execution),
        Err(err) => {
            if log.enabled {
                tracing::warn!(
                    target: "liteorm.sql",
                    kind = ?kind,
                    sql = %log.truncate(sql),
                    error = %err,
                    "statement failed"
                );
            }
            Err(err)
        }
    }
}
