//! Validation error types
//!
//! Error codes:
//! - REG_VALIDATION_FAILED (REJECT) - a field is missing, mistyped or out of range
//! - REG_INVALID_BODY (REJECT) - the request body is not a JSON object

use std::fmt;

/// Validation error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// A field violates its constraint
    RegValidationFailed,
    /// Body is not an object
    RegInvalidBody,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::RegValidationFailed => "REG_VALIDATION_FAILED",
            SchemaErrorCode::RegInvalidBody => "REG_INVALID_BODY",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Validation failure details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Field name (e.g., "age")
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(field: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: "field to be present".into(),
            actual: "missing".into(),
        }
    }

    pub fn type_mismatch(field: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(field, expected, actual)
    }

    pub fn out_of_range(field: impl Into<String>, expected: impl Into<String>, actual: i64) -> Self {
        Self::new(field, expected, actual.to_string())
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': expected {}, got {}", self.field, self.expected, self.actual)
    }
}

/// Validation error with field-level context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    details: Option<ValidationDetails>,
}

impl SchemaError {
    /// Create a field validation error
    pub fn validation_failed(details: ValidationDetails) -> Self {
        Self {
            code: SchemaErrorCode::RegValidationFailed,
            message: format!("Validation failed: {}", details),
            details: Some(details),
        }
    }

    /// Create an error for a body that is not a JSON object
    pub fn invalid_body(found: &str) -> Self {
        Self {
            code: SchemaErrorCode::RegInvalidBody,
            message: format!("Request body must be a JSON object, got {}", found),
            details: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns validation details if applicable
    pub fn details(&self) -> Option<&ValidationDetails> {
        self.details.as_ref()
    }

    /// Name of the offending field, if the error concerns one
    pub fn field(&self) -> Option<&str> {
        self.details.as_ref().map(|d| d.field.as_str())
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for validation
pub type SchemaResult<T> = Result<T, SchemaError>;
