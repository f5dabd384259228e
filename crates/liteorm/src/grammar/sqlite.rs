use super::{BuiltQuery, Grammar, GrammarConfig};
use crate::error::OrmResult;
use crate::ident::Ident;
use crate::query::clause::Lock;
use crate::query::Builder;
use crate::value::Value;

/// SQLite family.
///
/// Differs from the base dialect in two places: there is no `TRUNCATE`, and
/// row locks are not rendered.
#[derive(Debug, Clone, Default)]
pub struct SqliteGrammar {
    config: GrammarConfig,
}

impl SqliteGrammar {
    pub fn new(config: GrammarConfig) -> Self {
        Self { config }
    }
}

impl Grammar for SqliteGrammar {
    fn config(&self) -> &GrammarConfig {
        &self.config
    }

    /// Reset the autoincrement counter, then delete every row.
    fn compile_truncate(&self, query: &Builder) -> OrmResult<Vec<BuiltQuery>> {
        let table = self.table_for(query, "truncate")?;
        // sqlite_sequence stores the unquoted, prefixed name.
        let name = match query.from.as_ref() {
            Some(Ident::Name(name)) => Value::Text(format!("{}{name}", self.table_prefix())),
            Some(Ident::Raw(expr)) => Value::Text(expr.to_string()),
            None => Value::Null,
        };
        Ok(vec![
            BuiltQuery::new(
                format!("DELETE FROM sqlite_sequence WHERE name = {}", self.marker()),
                vec![name],
            ),
            BuiltQuery::new(format!("DELETE FROM {table}"), Vec::new()),
        ])
    }

    fn compile_lock(&self, _lock: &Lock) -> String {
        String::new()
    }
}
