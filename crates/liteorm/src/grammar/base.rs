use super::{Grammar, GrammarConfig};

/// The base dialect: every rule as defined on [`Grammar`].
#[derive(Debug, Clone, Default)]
pub struct QueryGrammar {
    config: GrammarConfig,
}

impl QueryGrammar {
    pub fn new(config: GrammarConfig) -> Self {
        Self { config }
    }
}

impl Grammar for QueryGrammar {
    fn config(&self) -> &GrammarConfig {
        &self.config
    }
}
