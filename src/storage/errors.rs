//! Storage error types
//!
//! Error codes:
//! - REG_STORAGE_IO_ERROR
//! - REG_STORAGE_WRITE_FAILED
//! - REG_STORAGE_PARSE_ERROR - the data file is not a valid collection
//!
//! Every storage error fails the request that hit it; the server keeps running.

use std::fmt;
use std::io;

/// Storage-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    /// Reading the data file failed
    RegStorageIoError,
    /// Writing the data file failed
    RegStorageWriteFailed,
    /// Data file contents are not a JSON array or object of records
    RegStorageParseError,
}

impl StorageErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StorageErrorCode::RegStorageIoError => "REG_STORAGE_IO_ERROR",
            StorageErrorCode::RegStorageWriteFailed => "REG_STORAGE_WRITE_FAILED",
            StorageErrorCode::RegStorageParseError => "REG_STORAGE_PARSE_ERROR",
        }
    }
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Storage error with context
#[derive(Debug)]
pub struct StorageError {
    /// Error code
    code: StorageErrorCode,
    /// Human-readable message
    message: String,
    /// Path of the data file involved, if any
    path: Option<String>,
    /// Underlying IO error if applicable
    source: Option<io::Error>,
}

impl StorageError {
    /// Create a new storage I/O error
    pub fn io_error(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: StorageErrorCode::RegStorageIoError,
            message: message.into(),
            path: None,
            source: Some(source),
        }
    }

    /// Create a new storage write failed error
    pub fn write_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: StorageErrorCode::RegStorageWriteFailed,
            message: message.into(),
            path: None,
            source: Some(source),
        }
    }

    /// Create a storage write failed error without IO source
    pub fn write_failed_no_source(message: impl Into<String>) -> Self {
        Self {
            code: StorageErrorCode::RegStorageWriteFailed,
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create a parse error for a corrupt or mistyped data file
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self {
            code: StorageErrorCode::RegStorageParseError,
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Attach the data file path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Returns the error code
    pub fn code(&self) -> StorageErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the data file path, if recorded
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)?;
        if let Some(ref path) = self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
