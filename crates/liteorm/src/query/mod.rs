//! Statement construction.
//!
//! [`Builder`] is the statement; the submodules hold what it stores.

mod bindings;
mod builder;
pub mod clause;
mod execute;
pub mod join;
pub mod predicate;

#[cfg(test)]
mod tests;

pub use bindings::{BindingKind, Bindings};
pub use builder::{Builder, SubSelect};
pub use clause::{
    record, Aggregate, AggregateFunction, Direction, Lock, Order, Record, Records, Union,
};
pub use join::{JoinClause, JoinConstraint, JoinTarget, JoinType};
pub use predicate::{is_operator, Condition, Connector, InValues, Operand, Predicate, OPERATORS};
