//! Dialect compilers.
//!
//! A [`Grammar`] turns a [`Builder`] into SQL text. The base rules live in the
//! trait's default methods; dialects override only what differs.
//!
//! Placeholders are emitted in the same clause order the builder flattens
//! its bindings in (select, from, join, where, having, order, union,
//! union order), so `query.to_sql()` and `query.get_bindings()` always line
//! up positionally.

mod base;
mod sqlite;


pub use base::QueryGrammar;
pub use sqlite::SqliteGrammar;

use crate::error::{OrmError, OrmResult};
use crate::ident::Ident;
use crate::query::clause::{Lock, Order, Record};
use crate::query::join::{JoinClause, JoinConstraint, JoinTarget};
use crate::query::predicate::Predicate;
use crate::query::Builder;
use crate::value::Value;
use std::fmt::Debug;

/// Settings shared by every grammar.
#[derive(Debug, Clone)]
pub struct GrammarConfig {
    /// Placeholder token.
    pub marker: String,
    /// Prepended to every table name.
    pub table_prefix: String,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            marker: "?".to_string(),
            table_prefix: String::new(),
        }
    }
}

impl GrammarConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder token.
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Set the table prefix.
    pub fn table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }
}

/// One compiled statement with its positional bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub bindings: Vec<Value>,
}

impl BuiltQuery {
    pub fn new(sql: impl Into<String>, bindings: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            bindings,
        }
    }
}

/// SELECT clause components, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Aggregate,
    Columns,
    From,
    Joins,
    Wheres,
    Groups,
    Havings,
    Orders,
    Limit,
    Offset,
    Unions,
    Lock,
}

pub const SELECT_COMPONENTS: [Component; 12] = [
    Component::Aggregate,
    Component::Columns,
    Component::From,
    Component::Joins,
    Component::Wheres,
    Component::Groups,
    Component::Havings,
    Component::Orders,
    Component::Limit,
    Component::Offset,
    Component::Unions,
    Component::Lock,
];

/// Remove the first `AND `/`OR ` (any case) from `value`.
///
/// The match is the earliest one anywhere in the string, not only at the
/// start. Callers always pass text that begins with a connector.
pub fn remove_leading_boolean(value: &str) -> String {
    let lower = value.to_ascii_lowercase();
    let hit = [("and ", lower.find("and ")), ("or ", lower.find("or "))]
        .into_iter()
        .filter_map(|(token, pos)| pos.map(|p| (p, token.len())))
        .min_by_key(|(pos, _)| *pos);

    match hit {
        Some((pos, len)) => format!("{}{}", &value[..pos], &value[pos + len..]),
        None => value.to_string(),
    }
}

/// Compiles statements for one SQL dialect.
pub trait Grammar: Debug + Send + Sync {
    fn config(&self) -> &GrammarConfig;

    fn marker(&self) -> &str {
        &self.config().marker
    }

    fn table_prefix(&self) -> &str {
        &self.config().table_prefix
    }

    fn quote_char(&self) -> char {
        '`'
    }

    // ==================== Quoting ====================

    /// Quote a single identifier segment. `*` is left alone.
    fn wrap_value(&self, value: &str) -> String {
        if value == "*" {
            return value.to_string();
        }
        let q = self.quote_char();
        let escaped = value.replace(q, &format!("{q}{q}"));
        format!("{q}{escaped}{q}")
    }

    /// Quote a column reference (`a.b`, `expr AS alias`).
    fn wrap(&self, value: &Ident) -> String {
        match value {
            Ident::Raw(expr) => expr.to_string(),
            Ident::Name(name) => self.wrap_name(name, false),
        }
    }

    /// Quote a table reference, applying the table prefix.
    fn wrap_table(&self, table: &Ident) -> String {
        match table {
            Ident::Raw(expr) => expr.to_string(),
            Ident::Name(name) => self.wrap_name(&format!("{}{name}", self.table_prefix()), true),
        }
    }

    fn wrap_name(&self, name: &str, prefix_alias: bool) -> String {
        if let Some(pos) = name.to_ascii_lowercase().find(" as ") {
            let (left, right) = (name[..pos].trim(), name[pos + 4..].trim());
            let alias = if prefix_alias {
                format!("{}{right}", self.table_prefix())
            } else {
                right.to_string()
            };
            return format!("{} AS {}", self.wrap_name(left, false), self.wrap_value(&alias));
        }

        name.split('.')
            .map(|segment| self.wrap_value(segment))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn columnize(&self, columns: &[Ident]) -> String {
        columns
            .iter()
            .map(|c| self.wrap(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Placeholder for a value, or the value itself when it is raw SQL.
    fn parameter(&self, value: &Value) -> String {
        match value {
            Value::Raw(expr) => expr.to_string(),
            _ => self.marker().to_string(),
        }
    }

    fn parameterize(&self, values: &[Value]) -> String {
        values
            .iter()
            .map(|v| self.parameter(v))
            .collect::<Vec<_>>()
            .join(", ")
    }

    // ==================== SELECT ====================

    fn compile_select(&self, query: &Builder) -> OrmResult<String> {
        let mut parts = Vec::with_capacity(SELECT_COMPONENTS.len());
        for component in SELECT_COMPONENTS {
            let sql = self.compile_component(query, component)?;
            if !sql.is_empty() {
                parts.push(sql);
            }
        }
        Ok(parts.join(" ").trim().to_string())
    }

    fn compile_component(&self, query: &Builder, component: Component) -> OrmResult<String> {
        Ok(match component {
            Component::Aggregate => self.compile_aggregate(query),
            Component::Columns => self.compile_columns(query),
            Component::From => query
                .from
                .as_ref()
                .map(|t| format!("FROM {}", self.wrap_table(t)))
                .unwrap_or_default(),
            Component::Joins => self.compile_joins(&query.joins),
            Component::Wheres => self.compile_wheres(query)?,
            Component::Groups => self.compile_groups(&query.groups),
            Component::Havings => self.compile_predicates(&query.havings, "HAVING")?,
            Component::Orders => self.compile_orders(&query.orders)?,
            Component::Limit => self.compile_limit(query.limit),
            Component::Offset => self.compile_offset(query.offset),
            Component::Unions => self.compile_unions(query)?,
            Component::Lock => query
                .lock
                .as_ref()
                .map(|lock| self.compile_lock(lock))
                .unwrap_or_default(),
        })
    }

    fn compile_aggregate(&self, query: &Builder) -> String {
        let Some(aggregate) = &query.aggregate else {
            return String::new();
        };
        let mut column = if aggregate.columns.is_empty() {
            "*".to_string()
        } else {
            self.columnize(&aggregate.columns)
        };
        if query.distinct && column != "*" {
            column = format!("DISTINCT {column}");
        }
        format!("SELECT {}({column}) AS aggregate", aggregate.function.as_str())
    }

    fn compile_columns(&self, query: &Builder) -> String {
        if query.aggregate.is_some() {
            return String::new();
        }
        let select = if query.distinct { "SELECT DISTINCT" } else { "SELECT" };
        if query.columns.is_empty() {
            format!("{select} *")
        } else {
            format!("{select} {}", self.columnize(&query.columns))
        }
    }

    fn compile_joins(&self, joins: &[JoinClause]) -> String {
        joins
            .iter()
            .map(|join| self.compile_join(join))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn compile_join(&self, join: &JoinClause) -> String {
        let table = self.wrap_table(&join.table);
        let head = format!("{} JOIN {table}", join.join_type.as_str());
        if join.constraints.is_empty() {
            return head;
        }
        let constraints = join
            .constraints
            .iter()
            .map(|c| self.compile_join_constraint(c))
            .collect::<Vec<_>>()
            .join(" ");
        format!("{head} ON {}", remove_leading_boolean(&constraints))
    }

    fn compile_join_constraint(&self, constraint: &JoinConstraint) -> String {
        let second = match &constraint.second {
            JoinTarget::Column(column) => self.wrap(column),
            JoinTarget::Value(value) => self.parameter(value),
        };
        format!(
            "{} {} {} {second}",
            constraint.connector,
            self.wrap(&constraint.first),
            constraint.operator
        )
    }

    fn compile_wheres(&self, query: &Builder) -> OrmResult<String> {
        self.compile_predicates(&query.wheres, "WHERE")
    }

    /// `<keyword> <p1> <CONN> <p2> ...`, or empty when there are no predicates.
    fn compile_predicates(&self, predicates: &[Predicate], keyword: &str) -> OrmResult<String> {
        if predicates.is_empty() {
            return Ok(String::new());
        }
        let mut sql = Vec::with_capacity(predicates.len());
        for predicate in predicates {
            sql.push(format!(
                "{} {}",
                predicate.connector(),
                self.compile_predicate(predicate)?
            ));
        }
        Ok(format!("{keyword} {}", remove_leading_boolean(&sql.join(" "))))
    }

    fn compile_predicate(&self, predicate: &Predicate) -> OrmResult<String> {
        Ok(match predicate {
            Predicate::Basic {
                column,
                operator,
                value,
                ..
            } => format!("{} {operator} {}", self.wrap(column), self.parameter(value)),
            Predicate::Raw { sql, .. } => sql.clone(),
            Predicate::Between {
                column,
                low,
                high,
                negated,
                ..
            } => format!(
                "{} {} {} AND {}",
                self.wrap(column),
                if *negated { "NOT BETWEEN" } else { "BETWEEN" },
                self.parameter(low),
                self.parameter(high)
            ),
            Predicate::Nested { query, .. } => {
                let wheres = self.compile_wheres(query)?;
                let inner = wheres.strip_prefix("WHERE ").unwrap_or(&wheres);
                format!("({inner})")
            }
            Predicate::Sub {
                column,
                operator,
                query,
                ..
            } => format!(
                "{} {operator} ({})",
                self.wrap(column),
                self.compile_select(query)?
            ),
            Predicate::Exists { query, negated, .. } => format!(
                "{}EXISTS ({})",
                if *negated { "NOT " } else { "" },
                self.compile_select(query)?
            ),
            Predicate::In {
                column,
                values,
                negated,
                ..
            } => {
                if values.is_empty() {
                    let tautology = if *negated { "1 = 1" } else { "0 = 1" };
                    tautology.to_string()
                } else {
                    format!(
                        "{} {}IN ({})",
                        self.wrap(column),
                        if *negated { "NOT " } else { "" },
                        self.parameterize(values)
                    )
                }
            }
            Predicate::InSub {
                column,
                query,
                negated,
                ..
            } => format!(
                "{} {}IN ({})",
                self.wrap(column),
                if *negated { "NOT " } else { "" },
                self.compile_select(query)?
            ),
            Predicate::Null {
                column, negated, ..
            } => format!(
                "{} IS {}NULL",
                self.wrap(column),
                if *negated { "NOT " } else { "" }
            ),
        })
    }

    fn compile_groups(&self, groups: &[Ident]) -> String {
        if groups.is_empty() {
            return String::new();
        }
        format!("GROUP BY {}", self.columnize(groups))
    }

    fn compile_orders(&self, orders: &[Order]) -> OrmResult<String> {
        if orders.is_empty() {
            return Ok(String::new());
        }
        let mut compiled = Vec::with_capacity(orders.len());
        for order in orders {
            match order {
                Order::Column { column, direction } => {
                    compiled.push(format!("{} {}", self.wrap(column), direction.as_str()));
                }
                Order::Raw { sql } => {
                    return Err(OrmError::unsupported(format!(
                        "raw ORDER BY entries are not supported: {sql}"
                    )));
                }
            }
        }
        Ok(format!("ORDER BY {}", compiled.join(", ")))
    }

    fn compile_limit(&self, limit: Option<i64>) -> String {
        match limit {
            Some(n) if n > 0 => format!("LIMIT {n}"),
            _ => String::new(),
        }
    }

    fn compile_offset(&self, offset: Option<i64>) -> String {
        match offset {
            Some(n) if n > 0 => format!("OFFSET {n}"),
            _ => String::new(),
        }
    }

    fn compile_unions(&self, query: &Builder) -> OrmResult<String> {
        if query.unions.is_empty() {
            return Ok(String::new());
        }
        let mut sql = Vec::new();
        for union in &query.unions {
            let keyword = if union.all { "UNION ALL" } else { "UNION" };
            sql.push(format!("{keyword} {}", self.compile_select(&union.query)?));
        }
        sql.push(self.compile_orders(&query.union_orders)?);
        sql.push(self.compile_limit(query.union_limit));
        sql.push(self.compile_offset(query.union_offset));
        sql.retain(|part| !part.is_empty());
        Ok(sql.join(" "))
    }

    fn compile_lock(&self, lock: &Lock) -> String {
        match lock {
            Lock::Update => "FOR UPDATE".to_string(),
            Lock::Shared => "LOCK IN SHARE MODE".to_string(),
            Lock::Raw(sql) => sql.clone(),
        }
    }

    // ==================== Writes ====================

    /// `INSERT INTO t (cols) VALUES (...), (...)`. Every record is rendered
    /// with the first record's columns.
    fn compile_insert(&self, query: &Builder, records: &[Record]) -> OrmResult<String> {
        let table = self.table_for(query, "insert")?;
        let Some(first) = records.first() else {
            return Err(OrmError::compilation("insert requires at least one record"));
        };
        let columns: Vec<Ident> = first.keys().map(Ident::name).collect();
        let groups = records
            .iter()
            .map(|record| {
                let values: Vec<Value> = record.values().cloned().collect();
                format!("({})", self.parameterize(&values))
            })
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!(
            "INSERT INTO {table} ({}) VALUES {groups}",
            self.columnize(&columns)
        ))
    }

    /// `UPDATE t [joins] SET c = ?, ... [wheres]`
    fn compile_update(&self, query: &Builder, values: &Record) -> OrmResult<String> {
        let table = self.table_for(query, "update")?;
        let columns = values
            .iter()
            .map(|(column, value)| {
                format!("{} = {}", self.wrap(&Ident::name(column)), self.parameter(value))
            })
            .collect::<Vec<_>>()
            .join(", ");
        let joins = self.compile_joins(&query.joins);
        let joins = if joins.is_empty() {
            String::new()
        } else {
            format!(" {joins}")
        };
        let wheres = self.compile_wheres(query)?;
        Ok(format!("UPDATE {table}{joins} SET {columns} {wheres}")
            .trim()
            .to_string())
    }

    /// `DELETE FROM t [wheres]`
    fn compile_delete(&self, query: &Builder) -> OrmResult<String> {
        let table = self.table_for(query, "delete")?;
        let wheres = self.compile_wheres(query)?;
        Ok(format!("DELETE FROM {table} {wheres}").trim().to_string())
    }

    /// Statements that empty the table, executed in order.
    fn compile_truncate(&self, query: &Builder) -> OrmResult<Vec<BuiltQuery>> {
        let table = self.table_for(query, "truncate")?;
        Ok(vec![BuiltQuery::new(format!("TRUNCATE {table}"), Vec::new())])
    }

    /// The quoted target table, or a compilation error naming `statement`.
    fn table_for(&self, query: &Builder, statement: &str) -> OrmResult<String> {
        query
            .from
            .as_ref()
            .map(|t| self.wrap_table(t))
            .ok_or_else(|| OrmError::compilation(format!("cannot compile {statement} without a table")))
    }
}
