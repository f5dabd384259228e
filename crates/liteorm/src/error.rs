//! Error types for liteorm

use thiserror::Error;

/// Result type alias for liteorm operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for statement construction, compilation and execution
#[derive(Debug, Error)]
pub enum OrmError {
    /// Malformed builder input (where/join/subselect/insert shape)
    #[error("Construction error: {0}")]
    Construction(String),

    /// A path that is intentionally not implemented
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// The grammar cannot render the statement in its current state
    #[error("Compilation error: {0}")]
    Compilation(String),

    /// Failure reported by the storage collaborator
    #[error("Execution error: {0}")]
    Execution(String),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OrmError {
    /// Create a construction error
    pub fn construction(message: impl Into<String>) -> Self {
        Self::Construction(message.into())
    }

    /// Create an unsupported-operation error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    /// Create a compilation error
    pub fn compilation(message: impl Into<String>) -> Self {
        Self::Compilation(message.into())
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Check if this is a construction error
    pub fn is_construction(&self) -> bool {
        matches!(self, Self::Construction(_))
    }

    /// Check if this is an unsupported-operation error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }

    /// Check if this is a compilation error
    pub fn is_compilation(&self) -> bool {
        matches!(self, Self::Compilation(_))
    }

    /// Check if this is an execution error
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
