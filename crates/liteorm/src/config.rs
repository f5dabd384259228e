//! Explicit configuration, constructed once and passed to [`DatabaseManager`](crate::DatabaseManager).

/// SQL dialect used to compile statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Base grammar (`TRUNCATE`, `FOR UPDATE` locks).
    Base,
    /// SQLite family: two-statement truncate, no row locks.
    #[default]
    Sqlite,
}

/// SQL logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Emit `tracing` events for executed statements.
    pub enabled: bool,
    /// Truncate logged SQL (in chars). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_sql_length: Some(200),
        }
    }
}

impl LogConfig {
    /// Disable statement logging.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub(crate) fn truncate(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.chars().count() > max => {
                let cut: String = sql.chars().take(max).collect();
                format!("{cut}...")
            }
            _ => sql.to_string(),
        }
    }
}

/// Settings for the storage collaborator. Not interpreted by the core.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub name: String,
    pub version: String,
    pub display_name: String,
    pub size: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            name: "app.db".to_string(),
            version: "1.0".to_string(),
            display_name: "SQLite Offline Database".to_string(),
            size: 200_000,
        }
    }
}

/// Configuration for a [`DatabaseManager`](crate::DatabaseManager).
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Grammar used to compile statements.
    pub dialect: Dialect,
    /// Prefix prepended to every table name.
    pub table_prefix: String,
    /// Placeholder token.
    pub marker: String,
    /// Statement logging.
    pub log: LogConfig,
    /// Passed through to the storage collaborator.
    pub connection: ConnectionConfig,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            table_prefix: String::new(),
            marker: "?".to_string(),
            log: LogConfig::default(),
            connection: ConnectionConfig::default(),
        }
    }
}

impl DatabaseConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SQL dialect.
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Set the table prefix.
    pub fn table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }

    /// Set the placeholder token.
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Set the logging configuration.
    pub fn log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    /// Set the connection settings handed to the storage collaborator.
    pub fn connection(mut self, connection: ConnectionConfig) -> Self {
        self.connection = connection;
        self
    }
}
