//! Terminal operations: compile, hand one statement to the executor, and
//! shape the answer.

use super::Builder;
use crate::client::{run, Executor, StatementKind};
use crate::error::OrmResult;
use crate::ident::Ident;
use crate::query::clause::{Record, Records};
use crate::row::{FromRow, Row};
use crate::value::Value;

impl Builder {
    // ==================== Reads ====================

    /// Execute the SELECT and return all rows.
    pub async fn get(&self, conn: &impl Executor) -> OrmResult<Vec<Row>> {
        let sql = self.to_sql()?;
        let bindings = self.get_bindings();
        let execution = run(conn, &self.log, StatementKind::Select, &sql, &bindings).await?;
        Ok(self.processor.process_select(self, execution.rows))
    }

    /// Execute the SELECT with `columns` replacing the projection.
    pub async fn get_columns<I, C>(&self, conn: &impl Executor, columns: I) -> OrmResult<Vec<Row>>
    where
        I: IntoIterator<Item = C>,
        C: Into<Ident>,
    {
        self.clone().select(columns).get(conn).await
    }

    /// Execute the SELECT and map every row to `T`.
    pub async fn get_as<T: FromRow>(&self, conn: &impl Executor) -> OrmResult<Vec<T>> {
        let rows = self.get(conn).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// The first row, with `LIMIT 1` applied.
    pub async fn first(&self, conn: &impl Executor) -> OrmResult<Option<Row>> {
        let rows = self.clone().limit(1).get(conn).await?;
        Ok(rows.into_iter().next())
    }

    /// [`Builder::first`] with `columns` replacing the projection.
    pub async fn first_columns<I, C>(
        &self,
        conn: &impl Executor,
        columns: I,
    ) -> OrmResult<Option<Row>>
    where
        I: IntoIterator<Item = C>,
        C: Into<Ident>,
    {
        self.clone().select(columns).first(conn).await
    }

    /// [`Builder::first`] mapped to `T`.
    pub async fn first_as<T: FromRow>(&self, conn: &impl Executor) -> OrmResult<Option<T>> {
        let row = self.first(conn).await?;
        row.as_ref().map(T::from_row).transpose()
    }

    /// The row whose `id` equals `id`.
    pub async fn find(&self, conn: &impl Executor, id: impl Into<Value>) -> OrmResult<Option<Row>> {
        self.clone().where_eq("id", id.into())?.first(conn).await
    }

    // ==================== Aggregates ====================

    async fn aggregate_value(
        &self,
        conn: &impl Executor,
        function: &str,
        column: Ident,
    ) -> OrmResult<Value> {
        let query = self.clone().aggregate(function, [column])?;
        let rows = query.get(conn).await?;
        Ok(rows
            .first()
            .and_then(|row| row.get("aggregate"))
            .cloned()
            .unwrap_or(Value::Null))
    }

    /// `COUNT(*)`. An empty answer counts as zero.
    pub async fn count(&self, conn: &impl Executor) -> OrmResult<i64> {
        let value = self.aggregate_value(conn, "count", Ident::name("*")).await?;
        Ok(value.as_i64().unwrap_or(0))
    }

    pub async fn min(&self, conn: &impl Executor, column: impl Into<Ident>) -> OrmResult<Value> {
        self.aggregate_value(conn, "min", column.into()).await
    }

    pub async fn max(&self, conn: &impl Executor, column: impl Into<Ident>) -> OrmResult<Value> {
        self.aggregate_value(conn, "max", column.into()).await
    }

    pub async fn sum(&self, conn: &impl Executor, column: impl Into<Ident>) -> OrmResult<Value> {
        self.aggregate_value(conn, "sum", column.into()).await
    }

    pub async fn avg(&self, conn: &impl Executor, column: impl Into<Ident>) -> OrmResult<Value> {
        self.aggregate_value(conn, "avg", column.into()).await
    }

    // ==================== Writes ====================

    /// Insert one or more records and return the identifier assigned by the
    /// engine. Nothing is executed for an empty list.
    pub async fn insert(
        &self,
        conn: &impl Executor,
        records: impl Into<Records>,
    ) -> OrmResult<Option<i64>> {
        let Some(built) = self.to_insert_sql(records)? else {
            return Ok(None);
        };
        let execution = run(conn, &self.log, StatementKind::Insert, &built.sql, &built.bindings).await?;
        Ok(self.processor.process_insert_get_id(&execution))
    }

    /// Update matched rows; returns the affected row count.
    pub async fn update(&self, conn: &impl Executor, values: Record) -> OrmResult<u64> {
        let built = self.to_update_sql(values)?;
        let execution = run(conn, &self.log, StatementKind::Update, &built.sql, &built.bindings).await?;
        Ok(execution.rows_affected)
    }

    /// Delete matched rows; returns the affected row count.
    pub async fn delete(&self, conn: &impl Executor) -> OrmResult<u64> {
        let built = self.to_delete_sql()?;
        let execution = run(conn, &self.log, StatementKind::Delete, &built.sql, &built.bindings).await?;
        Ok(execution.rows_affected)
    }

    /// Delete the row whose `id` equals `id`.
    pub async fn delete_by_id(&self, conn: &impl Executor, id: impl Into<Value>) -> OrmResult<u64> {
        self.clone().where_eq("id", id.into())?.delete(conn).await
    }

    /// Empty the table. Statements run in order; the first failure stops
    /// the sequence.
    pub async fn truncate(&self, conn: &impl Executor) -> OrmResult<()> {
        for built in self.to_truncate_sql()? {
            run(conn, &self.log, StatementKind::Truncate, &built.sql, &built.bindings).await?;
        }
        Ok(())
    }
}
