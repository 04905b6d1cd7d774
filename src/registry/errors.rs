//! # Registry Errors
//!
//! Failures of a single registry operation. Every variant is terminal for
//! the request and is raised before anything is written.

use thiserror::Error;

use crate::schema::SchemaError;
use crate::storage::StorageError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry operation errors
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A field failed validation
    #[error("{0}")]
    Validation(#[from] SchemaError),

    /// A unique key is already taken
    #[error("{0}")]
    Duplicate(String),

    /// Lookup target is absent
    #[error("Student not found")]
    NotFound,

    /// Unsupported query parameter value or combination
    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    /// Reading or writing the data file failed
    #[error("{0}")]
    Storage(#[from] StorageError),
}

impl RegistryError {
    /// Duplicate email in the directory
    pub fn duplicate_email() -> Self {
        RegistryError::Duplicate("Email already exists".to_string())
    }

    /// Duplicate roster id
    pub fn duplicate_id() -> Self {
        RegistryError::Duplicate("ID already exists".to_string())
    }

    /// Duplicate roster roll number
    pub fn duplicate_roll_number() -> Self {
        RegistryError::Duplicate("Roll number already exists".to_string())
    }

    /// Whether the error was caused by the client rather than the server
    pub fn is_client_error(&self) -> bool {
        !matches!(self, RegistryError::Storage(_))
    }

    /// Short stable name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            RegistryError::Validation(_) => "validation",
            RegistryError::Duplicate(_) => "duplicate",
            RegistryError::NotFound => "not_found",
            RegistryError::InvalidQuery(_) => "invalid_query",
            RegistryError::Storage(_) => "storage",
        }
    }
}
