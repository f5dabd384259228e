//! The statement builder: a mutable description of one query plus its
//! per-clause bindings.

use crate::config::LogConfig;
use crate::error::{OrmError, OrmResult};
use crate::grammar::{BuiltQuery, Grammar};
use crate::ident::Ident;
use crate::processor::Processor;
use crate::query::bindings::{BindingKind, Bindings};
use crate::query::clause::{
    Aggregate, AggregateFunction, Direction, Lock, Order, Record, Records, Union,
};
use crate::query::join::{JoinClause, JoinTarget, JoinType};
use crate::query::predicate::{is_operator, Condition, Connector, InValues, Operand, Predicate};
use crate::value::{Expression, Value};
use std::sync::Arc;

/// Subselect source for [`Builder::select_sub`].
#[derive(Debug, Clone)]
pub enum SubSelect {
    Query(Box<Builder>),
    Sql(String),
}

impl From<Builder> for SubSelect {
    fn from(q: Builder) -> Self {
        SubSelect::Query(Box::new(q))
    }
}

impl From<&str> for SubSelect {
    fn from(sql: &str) -> Self {
        SubSelect::Sql(sql.to_string())
    }
}

impl From<String> for SubSelect {
    fn from(sql: String) -> Self {
        SubSelect::Sql(sql)
    }
}

/// A single SELECT/INSERT/UPDATE/DELETE statement under construction.
///
/// Methods that can reject their input return `OrmResult<Self>`; the rest
/// return `Self`. Every value that needs a placeholder is recorded in its
/// clause's binding list at the moment it is added.
///
/// # Example
/// ```ignore
/// let q = manager
///     .table("users")
///     .where_("votes", ">", 100)?
///     .or_where_eq("name", "John")?
///     .order_by("created_at", "desc")
///     .limit(10);
///
/// assert_eq!(
///     q.to_sql()?,
///     "SELECT * FROM `users` WHERE `votes` > ? OR `name` = ? ORDER BY `created_at` DESC LIMIT 10"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    pub(crate) grammar: Arc<dyn Grammar>,
    pub(crate) processor: Arc<dyn Processor>,
    pub(crate) log: LogConfig,
    pub(crate) bindings: Bindings,
    pub(crate) aggregate: Option<Aggregate>,
    /// Empty means `*`.
    pub(crate) columns: Vec<Ident>,
    pub(crate) distinct: bool,
    pub(crate) from: Option<Ident>,
    pub(crate) joins: Vec<JoinClause>,
    pub(crate) wheres: Vec<Predicate>,
    pub(crate) groups: Vec<Ident>,
    pub(crate) havings: Vec<Predicate>,
    pub(crate) orders: Vec<Order>,
    pub(crate) limit: Option<i64>,
    pub(crate) offset: Option<i64>,
    pub(crate) unions: Vec<Union>,
    pub(crate) union_orders: Vec<Order>,
    pub(crate) union_limit: Option<i64>,
    pub(crate) union_offset: Option<i64>,
    pub(crate) lock: Option<Lock>,
}

impl Builder {
    /// Create an empty statement compiled by `grammar`.
    pub fn new(grammar: Arc<dyn Grammar>, processor: Arc<dyn Processor>, log: LogConfig) -> Self {
        Self {
            grammar,
            processor,
            log,
            bindings: Bindings::new(),
            aggregate: None,
            columns: Vec::new(),
            distinct: false,
            from: None,
            joins: Vec::new(),
            wheres: Vec::new(),
            groups: Vec::new(),
            havings: Vec::new(),
            orders: Vec::new(),
            limit: None,
            offset: None,
            unions: Vec::new(),
            union_orders: Vec::new(),
            union_limit: None,
            union_offset: None,
            lock: None,
        }
    }

    /// A fresh statement sharing this one's grammar and processor.
    pub fn new_query(&self) -> Self {
        Self::new(self.grammar.clone(), self.processor.clone(), self.log.clone())
    }

    /// A fresh statement over the same table, for building nested groups.
    pub fn for_nested_where(&self) -> Self {
        let mut query = self.new_query();
        query.from = self.from.clone();
        query
    }

    pub fn grammar(&self) -> &Arc<dyn Grammar> {
        &self.grammar
    }

    // ==================== SELECT columns ====================

    /// Replace the projected columns. An empty list selects `*`.
    pub fn select<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Ident>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Append one projected column (a name or a raw expression).
    pub fn add_select(mut self, column: impl Into<Ident>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Append a raw select expression and its bindings.
    pub fn select_raw(mut self, sql: impl Into<String>, bindings: Vec<Value>) -> Self {
        self.columns.push(Ident::Raw(Expression::new(sql)));
        self.bindings.extend(BindingKind::Select, bindings);
        self
    }

    /// Append `(<subquery>) AS <alias>`.
    pub fn select_sub(self, query: impl Into<SubSelect>, alias: &str) -> OrmResult<Self> {
        let (sql, bindings) = match query.into() {
            SubSelect::Query(q) => (q.to_sql()?, q.get_bindings()),
            SubSelect::Sql(sql) if !sql.trim().is_empty() => (sql, Vec::new()),
            SubSelect::Sql(_) => return Err(OrmError::construction("invalid subselect: empty SQL")),
        };
        let alias = self.grammar.wrap(&Ident::name(alias));
        Ok(self.select_raw(format!("({sql}) AS {alias}"), bindings))
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Set the source table.
    pub fn from(mut self, table: impl Into<Ident>) -> Self {
        self.from = Some(table.into());
        self
    }

    // ==================== JOIN ====================

    fn add_join(
        self,
        table: Ident,
        first: Ident,
        operator: &str,
        second: JoinTarget,
        join_type: JoinType,
    ) -> OrmResult<Self> {
        if first.as_name().is_some_and(|name| name.trim().is_empty()) {
            return Err(OrmError::construction(format!(
                "join on `{table}` is missing its first column"
            )));
        }
        let clause = JoinClause::new(table, join_type);
        let clause = match second {
            JoinTarget::Column(column) => clause.on(first, operator, column),
            JoinTarget::Value(value) => clause.where_(first, operator, value),
        };
        Ok(self.join_clause(clause))
    }

    /// `INNER JOIN table ON first op second`
    pub fn join(
        self,
        table: impl Into<Ident>,
        first: impl Into<Ident>,
        operator: &str,
        second: impl Into<Ident>,
    ) -> OrmResult<Self> {
        self.add_join(
            table.into(),
            first.into(),
            operator,
            JoinTarget::Column(second.into()),
            JoinType::Inner,
        )
    }

    /// `INNER JOIN table ON first op ?`
    pub fn join_where(
        self,
        table: impl Into<Ident>,
        first: impl Into<Ident>,
        operator: &str,
        value: impl Into<Value>,
    ) -> OrmResult<Self> {
        self.add_join(
            table.into(),
            first.into(),
            operator,
            JoinTarget::Value(value.into()),
            JoinType::Inner,
        )
    }

    /// `LEFT JOIN table ON first op second`
    pub fn left_join(
        self,
        table: impl Into<Ident>,
        first: impl Into<Ident>,
        operator: &str,
        second: impl Into<Ident>,
    ) -> OrmResult<Self> {
        self.add_join(
            table.into(),
            first.into(),
            operator,
            JoinTarget::Column(second.into()),
            JoinType::Left,
        )
    }

    /// `LEFT JOIN table ON first op ?`
    pub fn left_join_where(
        self,
        table: impl Into<Ident>,
        first: impl Into<Ident>,
        operator: &str,
        value: impl Into<Value>,
    ) -> OrmResult<Self> {
        self.add_join(
            table.into(),
            first.into(),
            operator,
            JoinTarget::Value(value.into()),
            JoinType::Left,
        )
    }

    /// `RIGHT JOIN table ON first op second`
    pub fn right_join(
        self,
        table: impl Into<Ident>,
        first: impl Into<Ident>,
        operator: &str,
        second: impl Into<Ident>,
    ) -> OrmResult<Self> {
        self.add_join(
            table.into(),
            first.into(),
            operator,
            JoinTarget::Column(second.into()),
            JoinType::Right,
        )
    }

    /// `RIGHT JOIN table ON first op ?`
    pub fn right_join_where(
        self,
        table: impl Into<Ident>,
        first: impl Into<Ident>,
        operator: &str,
        value: impl Into<Value>,
    ) -> OrmResult<Self> {
        self.add_join(
            table.into(),
            first.into(),
            operator,
            JoinTarget::Value(value.into()),
            JoinType::Right,
        )
    }

    /// Attach a prebuilt clause, keeping its join type.
    pub fn join_clause(mut self, clause: JoinClause) -> Self {
        self.bindings.extend(BindingKind::Join, clause.bindings.iter().cloned());
        self.joins.push(clause);
        self
    }

    /// Attach a prebuilt clause as a LEFT JOIN.
    pub fn left_join_clause(self, clause: JoinClause) -> Self {
        self.join_clause(clause.set_type(JoinType::Left))
    }

    /// Attach a prebuilt clause as a RIGHT JOIN.
    pub fn right_join_clause(self, clause: JoinClause) -> Self {
        self.join_clause(clause.set_type(JoinType::Right))
    }

    // ==================== WHERE ====================

    /// Apply one `where` input shape.
    ///
    /// - [`Condition::Map`]: one equality per entry, AND-ed, in entry order.
    /// - [`Condition::Nested`]: the statement's wheres as a parenthesized group;
    ///   its `from` is set to this statement's.
    /// - [`Condition::Tuples`]: each `[column, operator, value]` applied to a
    ///   private statement, then added as one group. Any other length fails.
    /// - [`Condition::Column`]: see [`Builder::where_`].
    pub fn where_cond(self, condition: impl Into<Condition>, connector: Connector) -> OrmResult<Self> {
        match condition.into() {
            Condition::Map(pairs) => {
                let mut query = self;
                for (column, value) in pairs {
                    query = query.where_column(
                        Ident::Name(column),
                        Some("=".to_string()),
                        Some(value),
                        Connector::And,
                    )?;
                }
                Ok(query)
            }
            Condition::Nested(query) => Ok(self.add_nested(*query, connector)),
            Condition::Tuples(tuples) => {
                let mut nested = self.new_query();
                for tuple in tuples {
                    let [column, operator, value]: [Operand; 3] =
                        tuple.try_into().map_err(|t: Vec<Operand>| {
                            OrmError::construction(format!(
                                "invalid condition in where(): expected [column, operator, value], got {} elements",
                                t.len()
                            ))
                        })?;
                    let column = column.as_text().map(Ident::name).ok_or_else(|| {
                        OrmError::construction("invalid condition in where(): column must be a string")
                    })?;
                    let operator = operator.as_text().map(str::to_string).ok_or_else(|| {
                        OrmError::construction("invalid condition in where(): operator must be a string")
                    })?;
                    nested = nested.where_column(column, Some(operator), Some(value), Connector::And)?;
                }
                Ok(self.add_nested(nested, connector))
            }
            Condition::Column {
                column,
                operator,
                value,
            } => self.where_column(column, operator, value, connector),
        }
    }

    /// OR variant of [`Builder::where_cond`].
    pub fn or_where_cond(self, condition: impl Into<Condition>) -> OrmResult<Self> {
        self.where_cond(condition, Connector::Or)
    }

    /// `column operator ?`.
    ///
    /// - An operator outside [`OPERATORS`](crate::query::OPERATORS) is taken as
    ///   the value and the operator becomes `=`.
    /// - A subquery value compiles as `column operator (<subquery>)`.
    /// - A null value becomes `IS NULL` (`=`) or `IS NOT NULL` (`!=`, `<>`)
    ///   with no binding. Other operators are rejected with a construction
    ///   error rather than being read as `IS NOT NULL`.
    /// - A list value is rejected; use [`Builder::where_in`].
    pub fn where_(
        self,
        column: impl Into<Ident>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> OrmResult<Self> {
        self.where_column(
            column.into(),
            Some(operator.to_string()),
            Some(value.into()),
            Connector::And,
        )
    }

    pub fn or_where(
        self,
        column: impl Into<Ident>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> OrmResult<Self> {
        self.where_column(
            column.into(),
            Some(operator.to_string()),
            Some(value.into()),
            Connector::Or,
        )
    }

    /// Two-argument form: `column = ?`.
    pub fn where_eq(self, column: impl Into<Ident>, value: impl Into<Operand>) -> OrmResult<Self> {
        self.where_column(column.into(), None, Some(value.into()), Connector::And)
    }

    pub fn or_where_eq(self, column: impl Into<Ident>, value: impl Into<Operand>) -> OrmResult<Self> {
        self.where_column(column.into(), None, Some(value.into()), Connector::Or)
    }

    /// One equality per `(column, value)` pair, AND-ed in iteration order.
    pub fn where_map<K, V>(self, pairs: impl IntoIterator<Item = (K, V)>) -> OrmResult<Self>
    where
        K: Into<String>,
        V: Into<Operand>,
    {
        self.where_cond(Condition::map(pairs), Connector::And)
    }

    /// `[column, operator, value]` triples as one parenthesized group.
    pub fn where_all(self, tuples: Vec<Vec<Operand>>) -> OrmResult<Self> {
        self.where_cond(Condition::Tuples(tuples), Connector::And)
    }

    pub fn or_where_all(self, tuples: Vec<Vec<Operand>>) -> OrmResult<Self> {
        self.where_cond(Condition::Tuples(tuples), Connector::Or)
    }

    /// Another statement's wheres as a parenthesized group.
    pub fn where_nested(self, query: Builder) -> Self {
        self.add_nested(query, Connector::And)
    }

    pub fn or_where_nested(self, query: Builder) -> Self {
        self.add_nested(query, Connector::Or)
    }

    fn where_column(
        mut self,
        column: Ident,
        operator: Option<String>,
        value: Option<Operand>,
        connector: Connector,
    ) -> OrmResult<Self> {
        let (operator, value) = match (operator, value) {
            (Some(operator), None) => ("=".to_string(), Operand::Value(Value::Text(operator))),
            (None, Some(value)) => ("=".to_string(), value),
            (Some(operator), Some(value)) if is_operator(&operator) => (operator, value),
            (Some(operator), Some(_)) => ("=".to_string(), Operand::Value(Value::Text(operator))),
            (None, None) => {
                return Err(OrmError::construction(format!(
                    "where on `{column}`: a value must be provided"
                )));
            }
        };

        match value {
            Operand::Query(query) => Ok(self.where_sub(column, operator, *query, connector)),
            Operand::List(_) => Err(OrmError::unsupported(format!(
                "where on `{column}` received an array value; use where_in"
            ))),
            Operand::Value(Value::Null) => match operator.as_str() {
                "=" => Ok(self.add_null(column, false, connector)),
                "!=" | "<>" => Ok(self.add_null(column, true, connector)),
                _ => Err(OrmError::construction(format!(
                    "where on `{column}`: operator `{operator}` cannot be compared with null"
                ))),
            },
            Operand::Value(value) => {
                self.bindings.push(BindingKind::Where, value.clone());
                self.wheres.push(Predicate::Basic {
                    column,
                    operator,
                    value,
                    connector,
                });
                Ok(self)
            }
        }
    }

    fn add_nested(mut self, mut query: Builder, connector: Connector) -> Self {
        query.from = self.from.clone();
        if query.wheres.is_empty() {
            return self;
        }
        self.bindings
            .extend(BindingKind::Where, query.bindings.get(BindingKind::Where).iter().cloned());
        self.wheres.push(Predicate::Nested {
            query: Box::new(query),
            connector,
        });
        self
    }

    fn where_sub(mut self, column: Ident, operator: String, query: Builder, connector: Connector) -> Self {
        self.bindings.extend(BindingKind::Where, query.get_bindings());
        self.wheres.push(Predicate::Sub {
            column,
            operator,
            query: Box::new(query),
            connector,
        });
        self
    }

    fn add_raw(mut self, sql: &str, bindings: Vec<Value>, connector: Connector) -> Self {
        self.bindings.extend(BindingKind::Where, bindings);
        self.wheres.push(Predicate::Raw {
            sql: sql.to_string(),
            connector,
        });
        self
    }

    /// Literal SQL condition with its own bindings.
    pub fn where_raw(self, sql: &str, bindings: Vec<Value>) -> Self {
        self.add_raw(sql, bindings, Connector::And)
    }

    pub fn or_where_raw(self, sql: &str, bindings: Vec<Value>) -> Self {
        self.add_raw(sql, bindings, Connector::Or)
    }

    fn add_between(
        mut self,
        column: Ident,
        low: Value,
        high: Value,
        negated: bool,
        connector: Connector,
    ) -> Self {
        self.bindings
            .extend(BindingKind::Where, [low.clone(), high.clone()]);
        self.wheres.push(Predicate::Between {
            column,
            low,
            high,
            negated,
            connector,
        });
        self
    }

    /// `column BETWEEN ? AND ?`
    pub fn where_between(
        self,
        column: impl Into<Ident>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        self.add_between(column.into(), low.into(), high.into(), false, Connector::And)
    }

    pub fn or_where_between(
        self,
        column: impl Into<Ident>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        self.add_between(column.into(), low.into(), high.into(), false, Connector::Or)
    }

    /// `column NOT BETWEEN ? AND ?`
    pub fn where_not_between(
        self,
        column: impl Into<Ident>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        self.add_between(column.into(), low.into(), high.into(), true, Connector::And)
    }

    pub fn or_where_not_between(
        self,
        column: impl Into<Ident>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        self.add_between(column.into(), low.into(), high.into(), true, Connector::Or)
    }

    fn add_exists(mut self, query: Builder, negated: bool, connector: Connector) -> Self {
        self.bindings.extend(BindingKind::Where, query.get_bindings());
        self.wheres.push(Predicate::Exists {
            query: Box::new(query),
            negated,
            connector,
        });
        self
    }

    /// `EXISTS (<subquery>)`
    pub fn where_exists(self, query: Builder) -> Self {
        self.add_exists(query, false, Connector::And)
    }

    pub fn or_where_exists(self, query: Builder) -> Self {
        self.add_exists(query, false, Connector::Or)
    }

    /// `NOT EXISTS (<subquery>)`
    pub fn where_not_exists(self, query: Builder) -> Self {
        self.add_exists(query, true, Connector::And)
    }

    pub fn or_where_not_exists(self, query: Builder) -> Self {
        self.add_exists(query, true, Connector::Or)
    }

    fn add_in(mut self, column: Ident, values: InValues, negated: bool, connector: Connector) -> Self {
        match values {
            InValues::Query(query) => {
                self.bindings.extend(BindingKind::Where, query.get_bindings());
                self.wheres.push(Predicate::InSub {
                    column,
                    query,
                    negated,
                    connector,
                });
            }
            InValues::List(values) => {
                self.bindings.extend(BindingKind::Where, values.iter().cloned());
                self.wheres.push(Predicate::In {
                    column,
                    values,
                    negated,
                    connector,
                });
            }
        }
        self
    }

    /// `column IN (?, ...)` for a list, `column IN (<subquery>)` for a statement.
    pub fn where_in(self, column: impl Into<Ident>, values: impl Into<InValues>) -> Self {
        self.add_in(column.into(), values.into(), false, Connector::And)
    }

    pub fn or_where_in(self, column: impl Into<Ident>, values: impl Into<InValues>) -> Self {
        self.add_in(column.into(), values.into(), false, Connector::Or)
    }

    pub fn where_not_in(self, column: impl Into<Ident>, values: impl Into<InValues>) -> Self {
        self.add_in(column.into(), values.into(), true, Connector::And)
    }

    pub fn or_where_not_in(self, column: impl Into<Ident>, values: impl Into<InValues>) -> Self {
        self.add_in(column.into(), values.into(), true, Connector::Or)
    }

    fn add_null(mut self, column: Ident, negated: bool, connector: Connector) -> Self {
        self.wheres.push(Predicate::Null {
            column,
            negated,
            connector,
        });
        self
    }

    /// `column IS NULL`
    pub fn where_null(self, column: impl Into<Ident>) -> Self {
        self.add_null(column.into(), false, Connector::And)
    }

    pub fn or_where_null(self, column: impl Into<Ident>) -> Self {
        self.add_null(column.into(), false, Connector::Or)
    }

    /// `column IS NOT NULL`
    pub fn where_not_null(self, column: impl Into<Ident>) -> Self {
        self.add_null(column.into(), true, Connector::And)
    }

    pub fn or_where_not_null(self, column: impl Into<Ident>) -> Self {
        self.add_null(column.into(), true, Connector::Or)
    }

    // ==================== GROUP BY / HAVING ====================

    pub fn group_by<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Ident>,
    {
        self.groups.extend(columns.into_iter().map(Into::into));
        self
    }

    fn add_having(mut self, column: Ident, operator: &str, value: Value, connector: Connector) -> Self {
        self.bindings.push(BindingKind::Having, value.clone());
        self.havings.push(Predicate::Basic {
            column,
            operator: operator.to_string(),
            value,
            connector,
        });
        self
    }

    /// `HAVING column operator ?`
    pub fn having(self, column: impl Into<Ident>, operator: &str, value: impl Into<Value>) -> Self {
        self.add_having(column.into(), operator, value.into(), Connector::And)
    }

    pub fn or_having(self, column: impl Into<Ident>, operator: &str, value: impl Into<Value>) -> Self {
        self.add_having(column.into(), operator, value.into(), Connector::Or)
    }

    fn add_having_raw(mut self, sql: &str, bindings: Vec<Value>, connector: Connector) -> Self {
        self.bindings.extend(BindingKind::Having, bindings);
        self.havings.push(Predicate::Raw {
            sql: sql.to_string(),
            connector,
        });
        self
    }

    pub fn having_raw(self, sql: &str, bindings: Vec<Value>) -> Self {
        self.add_having_raw(sql, bindings, Connector::And)
    }

    pub fn or_having_raw(self, sql: &str, bindings: Vec<Value>) -> Self {
        self.add_having_raw(sql, bindings, Connector::Or)
    }

    // ==================== ORDER BY / LIMIT / OFFSET ====================
    //
    // Once a union is attached these target the union-level lists. The
    // decision is taken at call time.

    /// `ORDER BY column ASC|DESC`
    pub fn order_by(mut self, column: impl Into<Ident>, direction: impl Into<Direction>) -> Self {
        let order = Order::Column {
            column: column.into(),
            direction: direction.into(),
        };
        if self.unions.is_empty() {
            self.orders.push(order);
        } else {
            self.union_orders.push(order);
        }
        self
    }

    /// `ORDER BY column DESC`
    pub fn latest(self, column: impl Into<Ident>) -> Self {
        self.order_by(column, Direction::Desc)
    }

    /// `ORDER BY column ASC`
    pub fn oldest(self, column: impl Into<Ident>) -> Self {
        self.order_by(column, Direction::Asc)
    }

    /// Raw ORDER BY entry. Recorded, but compiling it is unsupported.
    pub fn order_by_raw(mut self, sql: &str, bindings: Vec<Value>) -> Self {
        let order = Order::Raw {
            sql: sql.to_string(),
        };
        if self.unions.is_empty() {
            self.orders.push(order);
            self.bindings.extend(BindingKind::Order, bindings);
        } else {
            self.union_orders.push(order);
            self.bindings.extend(BindingKind::UnionOrder, bindings);
        }
        self
    }

    pub fn limit(mut self, value: i64) -> Self {
        if self.unions.is_empty() {
            self.limit = Some(value);
        } else {
            self.union_limit = Some(value);
        }
        self
    }

    /// Negative offsets clamp to zero.
    pub fn offset(mut self, value: i64) -> Self {
        let value = value.max(0);
        if self.unions.is_empty() {
            self.offset = Some(value);
        } else {
            self.union_offset = Some(value);
        }
        self
    }

    /// Alias for [`Builder::limit`].
    pub fn take(self, value: i64) -> Self {
        self.limit(value)
    }

    /// Alias for [`Builder::offset`].
    pub fn skip(self, value: i64) -> Self {
        self.offset(value)
    }

    /// `page` is 1-based.
    pub fn for_page(self, page: i64, per_page: i64) -> Self {
        self.skip((page - 1) * per_page).take(per_page)
    }

    // ==================== UNION / LOCK / AGGREGATE ====================

    fn add_union(mut self, query: Builder, all: bool) -> Self {
        self.bindings.extend(BindingKind::Union, query.get_bindings());
        self.unions.push(Union {
            query: Box::new(query),
            all,
        });
        self
    }

    pub fn union(self, query: Builder) -> Self {
        self.add_union(query, false)
    }

    pub fn union_all(self, query: Builder) -> Self {
        self.add_union(query, true)
    }

    pub fn lock(mut self, lock: Lock) -> Self {
        self.lock = Some(lock);
        self
    }

    pub fn lock_for_update(self) -> Self {
        self.lock(Lock::Update)
    }

    pub fn shared_lock(self) -> Self {
        self.lock(Lock::Shared)
    }

    /// Select `<function>(<columns>) AS aggregate` instead of the column list.
    pub fn aggregate<I, C>(mut self, function: &str, columns: I) -> OrmResult<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Ident>,
    {
        let function: AggregateFunction = function.parse()?;
        self.aggregate = Some(Aggregate {
            function,
            columns: columns.into_iter().map(Into::into).collect(),
        });
        Ok(self)
    }

    // ==================== MERGE ====================

    /// Fold another statement's clauses and bindings into this one.
    ///
    /// Named columns are deduplicated; limit/offset are taken from `other`
    /// only when set there.
    pub fn merge(mut self, other: Builder) -> Self {
        for column in other.columns {
            let duplicate = !column.is_raw() && self.columns.contains(&column);
            if !duplicate {
                self.columns.push(column);
            }
        }
        self.distinct |= other.distinct;
        self.joins.extend(other.joins);
        self.wheres.extend(other.wheres);
        self.groups.extend(other.groups);
        self.havings.extend(other.havings);
        self.orders.extend(other.orders);
        self.unions.extend(other.unions);
        self.union_orders.extend(other.union_orders);
        if other.limit.is_some() {
            self.limit = other.limit;
        }
        if other.offset.is_some() {
            self.offset = other.offset;
        }
        if other.union_limit.is_some() {
            self.union_limit = other.union_limit;
        }
        if other.union_offset.is_some() {
            self.union_offset = other.union_offset;
        }
        self.bindings.merge(&other.bindings);
        self
    }

    // ==================== Bindings / SQL ====================

    /// Append a binding to one category.
    pub fn add_binding(mut self, value: impl Into<Value>, kind: BindingKind) -> Self {
        self.bindings.push(kind, value.into());
        self
    }

    /// Replace one binding category.
    pub fn set_bindings(mut self, values: Vec<Value>, kind: BindingKind) -> Self {
        self.bindings.set(kind, values);
        self
    }

    /// All bindings, in placeholder order.
    pub fn get_bindings(&self) -> Vec<Value> {
        self.bindings.flatten()
    }

    /// Bindings grouped by clause category.
    pub fn raw_bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Drop raw expressions from a value list before execution.
    pub fn clean_bindings(values: Vec<Value>) -> Vec<Value> {
        values.into_iter().filter(|v| !v.is_raw()).collect()
    }

    /// Compile as a SELECT.
    pub fn to_sql(&self) -> OrmResult<String> {
        self.grammar.compile_select(self)
    }

    /// Compile as a SELECT together with its bindings.
    pub fn to_select_sql(&self) -> OrmResult<BuiltQuery> {
        Ok(BuiltQuery::new(self.to_sql()?, self.get_bindings()))
    }

    /// Compile an INSERT of one or more records. `None` when there is
    /// nothing to insert.
    ///
    /// Every record must carry the same columns as the first one. Bindings
    /// are row-major in sorted column order.
    pub fn to_insert_sql(&self, records: impl Into<Records>) -> OrmResult<Option<BuiltQuery>> {
        let records = records.into().into_vec();
        if records.iter().all(|r| r.is_empty()) {
            return Ok(None);
        }
        let Some(first) = records.first() else {
            return Ok(None);
        };
        if let Some(pos) = records.iter().position(|r| !r.keys().eq(first.keys())) {
            return Err(OrmError::construction(format!(
                "insert record {pos} does not have the same columns as the first record"
            )));
        }

        let sql = self.grammar.compile_insert(self, &records)?;
        let bindings = Self::clean_bindings(records.into_iter().flat_map(|r| r.into_values()).collect());
        Ok(Some(BuiltQuery::new(sql, bindings)))
    }

    /// Compile an UPDATE setting `values` on the rows matched by the wheres.
    ///
    /// Bindings are join, then SET values, then where.
    pub fn to_update_sql(&self, values: Record) -> OrmResult<BuiltQuery> {
        if values.is_empty() {
            return Err(OrmError::construction("update requires at least one column"));
        }
        let sql = self.grammar.compile_update(self, &values)?;
        let mut bindings = self.bindings.get(BindingKind::Join).to_vec();
        bindings.extend(Self::clean_bindings(values.into_values().collect()));
        bindings.extend_from_slice(self.bindings.get(BindingKind::Where));
        Ok(BuiltQuery::new(sql, bindings))
    }

    /// Compile a DELETE of the rows matched by the wheres.
    pub fn to_delete_sql(&self) -> OrmResult<BuiltQuery> {
        let sql = self.grammar.compile_delete(self)?;
        Ok(BuiltQuery::new(sql, self.bindings.get(BindingKind::Where).to_vec()))
    }

    /// Statements that empty the table, in execution order.
    pub fn to_truncate_sql(&self) -> OrmResult<Vec<BuiltQuery>> {
        self.grammar.compile_truncate(self)
    }

    pub fn get_from(&self) -> Option<&Ident> {
        self.from.as_ref()
    }

    pub fn columns(&self) -> &[Ident] {
        &self.columns
    }

    pub fn get_wheres(&self) -> &[Predicate] {
        &self.wheres
    }

    pub fn get_joins(&self) -> &[JoinClause] {
        &self.joins
    }

    pub fn get_limit(&self) -> Option<i64> {
        self.limit
    }

    pub fn get_offset(&self) -> Option<i64> {
        self.offset
    }
}
