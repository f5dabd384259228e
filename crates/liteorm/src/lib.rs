//! # liteorm
//!
//! A fluent SQL statement builder with pluggable dialect compilers.
//!
//! ## Features
//!
//! - **Fluent statements**: chain `select`, `join`, `where_`, `order_by`, `union`, ...
//! - **Ordered bindings**: every value lands in its clause's binding list, and
//!   the flattened list always matches placeholder order in the SQL text
//! - **Dialects**: a base grammar plus a SQLite grammar (two-statement truncate)
//! - **Raw expressions**: `raw("NOW()")` is rendered verbatim and never bound
//! - **No driver**: execution goes through the [`Executor`] trait you implement
//!
//! ## Example
//!
//! ```ignore
//! use liteorm::prelude::*;
//!
//! let db = DatabaseManager::new(DatabaseConfig::new());
//!
//! // SELECT
//! let rows = db
//!     .table("users")
//!     .where_("votes", ">", 100)?
//!     .order_by("name", "asc")
//!     .limit(10)
//!     .get(&conn)
//!     .await?;
//!
//! // INSERT
//! let id = db
//!     .table("users")
//!     .insert(&conn, record([("name", "alice"), ("email", "alice@example.com")]))
//!     .await?;
//!
//! // UPDATE
//! db.table("users")
//!     .where_eq("id", 1)?
//!     .update(&conn, record([("votes", 0)]))
//!     .await?;
//!
//! // DELETE
//! db.table("users").where_eq("id", 1)?.delete(&conn).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod grammar;
pub mod ident;
pub mod manager;
pub mod prelude;
pub mod processor;
pub mod query;
pub mod row;
pub mod value;

pub use client::{Execution, Executor, StatementKind};
pub use config::{ConnectionConfig, DatabaseConfig, Dialect, LogConfig};
pub use error::{OrmError, OrmResult};
pub use grammar::{BuiltQuery, Grammar, GrammarConfig, QueryGrammar, SqliteGrammar};
pub use ident::Ident;
pub use manager::DatabaseManager;
pub use processor::{DefaultProcessor, Processor, SqliteProcessor};
pub use query::{
    record, BindingKind, Bindings, Builder, Condition, Connector, Direction, JoinClause, JoinType,
    Lock, Operand, Record, Records,
};
pub use row::{FromRow, FromValue, Row};
pub use value::{raw, Expression, Value};
