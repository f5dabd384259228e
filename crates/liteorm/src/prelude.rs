//! Convenient imports for typical `liteorm` usage.
//!
//! ```ignore
//! use liteorm::prelude::*;
//! ```

pub use crate::{
    raw, record, Builder, DatabaseConfig, DatabaseManager, Dialect, Executor, Execution, FromRow,
    JoinClause, JoinType, OrmError, OrmResult, Record, Row, Value,
};
