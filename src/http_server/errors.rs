//! # HTTP Errors
//!
//! Maps registry failures and rejected requests to status codes and a JSON
//! error body. Extractor rejections never reach the client as plain text.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;

use crate::registry::RegistryError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Handler errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// The operation itself failed
    #[error("{0}")]
    Registry(#[from] RegistryError),

    /// Body is not parseable JSON
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Query string does not deserialize
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    /// Path segment does not deserialize
    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    /// The blocking task running the operation did not complete
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Registry(err) => match err {
                // 400 Bad Request
                RegistryError::Validation(_) => StatusCode::BAD_REQUEST,
                RegistryError::Duplicate(_) => StatusCode::BAD_REQUEST,
                RegistryError::InvalidQuery(_) => StatusCode::BAD_REQUEST,

                // 404 Not Found
                RegistryError::NotFound => StatusCode::NOT_FOUND,

                // 500 Internal Server Error
                RegistryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::InvalidBody(_) | ApiError::InvalidQuery(_) | ApiError::InvalidPath(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidPath(rejection.body_text())
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaError, ValidationDetails};
    use crate::storage::StorageError;

    #[test]
    fn test_status_codes() {
        let validation = ApiError::from(RegistryError::from(SchemaError::validation_failed(
            ValidationDetails::missing_field("email"),
        )));
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);

        let duplicate = ApiError::from(RegistryError::duplicate_email());
        assert_eq!(duplicate.status_code(), StatusCode::BAD_REQUEST);

        let missing = ApiError::from(RegistryError::NotFound);
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let storage = ApiError::from(RegistryError::from(StorageError::parse_error("bad")));
        assert_eq!(storage.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = ApiError::InvalidBody("EOF".to_string());
        assert_eq!(body.status_code(), StatusCode::BAD_REQUEST);

        let query = ApiError::InvalidQuery("duplicate field `name`".to_string());
        assert_eq!(query.status_code(), StatusCode::BAD_REQUEST);

        let path = ApiError::InvalidPath("invalid utf-8".to_string());
        assert_eq!(path.status_code(), StatusCode::BAD_REQUEST);

        let internal = ApiError::Internal("task cancelled".to_string());
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_response_body() {
        let body = ErrorResponse::from(ApiError::from(RegistryError::NotFound));

        assert_eq!(body.code, 404);
        assert_eq!(body.error, "Student not found");
    }
}
