//! Entry point that owns configuration and hands out statements.

use crate::config::{DatabaseConfig, Dialect};
use crate::grammar::{Grammar, GrammarConfig, QueryGrammar, SqliteGrammar};
use crate::ident::Ident;
use crate::processor::{DefaultProcessor, Processor, SqliteProcessor};
use crate::query::Builder;
use std::sync::Arc;

/// Owns the grammar and processor selected by a [`DatabaseConfig`].
///
/// ```ignore
/// let db = DatabaseManager::new(DatabaseConfig::new().table_prefix("app_"));
/// let rows = db.table("users").where_eq("id", 1)?.get(&conn).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseManager {
    config: DatabaseConfig,
    grammar: Arc<dyn Grammar>,
    processor: Arc<dyn Processor>,
}

impl DatabaseManager {
    pub fn new(config: DatabaseConfig) -> Self {
        let grammar_config = GrammarConfig::new()
            .marker(config.marker.clone())
            .table_prefix(config.table_prefix.clone());
        let grammar: Arc<dyn Grammar> = match config.dialect {
            Dialect::Base => Arc::new(QueryGrammar::new(grammar_config)),
            Dialect::Sqlite => Arc::new(SqliteGrammar::new(grammar_config)),
        };
        let processor: Arc<dyn Processor> = match config.dialect {
            Dialect::Base => Arc::new(DefaultProcessor),
            Dialect::Sqlite => Arc::new(SqliteProcessor),
        };
        Self {
            config,
            grammar,
            processor,
        }
    }

    /// Use a custom grammar and processor.
    pub fn with_parts(
        config: DatabaseConfig,
        grammar: Arc<dyn Grammar>,
        processor: Arc<dyn Processor>,
    ) -> Self {
        Self {
            config,
            grammar,
            processor,
        }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    pub fn grammar(&self) -> &Arc<dyn Grammar> {
        &self.grammar
    }

    /// A statement with no table.
    pub fn query(&self) -> Builder {
        Builder::new(
            self.grammar.clone(),
            self.processor.clone(),
            self.config.log.clone(),
        )
    }

    /// A fresh statement over `table`.
    pub fn table(&self, table: impl Into<Ident>) -> Builder {
        self.query().from(table)
    }
}

impl Default for DatabaseManager {
    fn default() -> Self {
        Self::new(DatabaseConfig::default())
    }
}
