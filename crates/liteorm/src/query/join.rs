//! JOIN clauses and their ON constraints.

use crate::ident::Ident;
use crate::query::predicate::Connector;
use crate::value::{Expression, Value};

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinType {
    #[default]
    Inner,
    Left,
    Right,
}

impl JoinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER",
            JoinType::Left => "LEFT",
            JoinType::Right => "RIGHT",
        }
    }
}

/// Right side of an ON constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinTarget {
    /// Another column, quoted by the grammar.
    Column(Ident),
    /// A bound value (placeholder), or a raw expression rendered inline.
    Value(Value),
}

/// One ON constraint: `<connector> <first> <operator> <second>`.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinConstraint {
    pub first: Ident,
    pub operator: String,
    pub second: JoinTarget,
    pub connector: Connector,
}

impl JoinConstraint {
    /// Whether the right side is a bound value rather than a column.
    pub fn is_value(&self) -> bool {
        matches!(self.second, JoinTarget::Value(_))
    }
}

/// A JOIN with its ordered ON constraints.
///
/// # Example
/// ```ignore
/// let clause = JoinClause::new("contacts", JoinType::Left)
///     .on("users.id", "=", "contacts.user_id")
///     .where_("contacts.kind", "=", "email")
///     .where_not_null("contacts.verified_at");
/// let q = manager.table("users").join_clause(clause);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub(crate) table: Ident,
    pub(crate) join_type: JoinType,
    pub(crate) constraints: Vec<JoinConstraint>,
    pub(crate) bindings: Vec<Value>,
}

impl JoinClause {
    pub fn new(table: impl Into<Ident>, join_type: JoinType) -> Self {
        Self {
            table: table.into(),
            join_type,
            constraints: Vec::new(),
            bindings: Vec::new(),
        }
    }

    pub fn table(&self) -> &Ident {
        &self.table
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn constraints(&self) -> &[JoinConstraint] {
        &self.constraints
    }

    /// Values bound by this clause, in constraint order.
    pub fn bindings(&self) -> &[Value] {
        &self.bindings
    }

    pub(crate) fn set_type(mut self, join_type: JoinType) -> Self {
        self.join_type = join_type;
        self
    }

    fn push(mut self, first: Ident, operator: &str, second: JoinTarget, connector: Connector) -> Self {
        if let JoinTarget::Value(value) = &second {
            if !value.is_raw() {
                self.bindings.push(value.clone());
            }
        }
        self.constraints.push(JoinConstraint {
            first,
            operator: operator.to_string(),
            second,
            connector,
        });
        self
    }

    /// Add `first op second` where `second` is a column.
    pub fn on(self, first: impl Into<Ident>, operator: &str, second: impl Into<Ident>) -> Self {
        self.push(first.into(), operator, JoinTarget::Column(second.into()), Connector::And)
    }

    /// OR variant of [`JoinClause::on`].
    pub fn or_on(self, first: impl Into<Ident>, operator: &str, second: impl Into<Ident>) -> Self {
        self.push(first.into(), operator, JoinTarget::Column(second.into()), Connector::Or)
    }

    /// Add `first op ?` with `value` bound.
    pub fn where_(self, first: impl Into<Ident>, operator: &str, value: impl Into<Value>) -> Self {
        self.push(first.into(), operator, JoinTarget::Value(value.into()), Connector::And)
    }

    /// OR variant of [`JoinClause::where_`].
    pub fn or_where(self, first: impl Into<Ident>, operator: &str, value: impl Into<Value>) -> Self {
        self.push(first.into(), operator, JoinTarget::Value(value.into()), Connector::Or)
    }

    /// Add `column IS NULL`.
    pub fn where_null(self, column: impl Into<Ident>) -> Self {
        self.null_check(column.into(), "NULL", Connector::And)
    }

    pub fn or_where_null(self, column: impl Into<Ident>) -> Self {
        self.null_check(column.into(), "NULL", Connector::Or)
    }

    /// Add `column IS NOT NULL`.
    pub fn where_not_null(self, column: impl Into<Ident>) -> Self {
        self.null_check(column.into(), "NOT NULL", Connector::And)
    }

    pub fn or_where_not_null(self, column: impl Into<Ident>) -> Self {
        self.null_check(column.into(), "NOT NULL", Connector::Or)
    }

    fn null_check(self, column: Ident, marker: &str, connector: Connector) -> Self {
        let marker = Ident::Raw(Expression::new(marker));
        self.push(column, "IS", JoinTarget::Column(marker), connector)
    }
}
