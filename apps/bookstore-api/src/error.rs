//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Bookstore API                      │
//! │                                                                         │
//! │  Handler → Result<Json<T>, ApiError>                                   │
//! │                                                                         │
//! │  JsonRejection ─────────────────────────────► 400 VALIDATION_ERROR     │
//! │  CoreError::Validation ─────────────────────► 400 VALIDATION_ERROR     │
//! │  CoreError::ReferencedNotFound ─────────────► 400 REFERENCED_NOT_FOUND │
//! │  CoreError::NotFound ───────────────────────► 404 NOT_FOUND            │
//! │  CoreError::Duplicate ──────────────────────► 409 CONFLICT             │
//! │  CoreError::Cancelled ──────────────────────► 503 CANCELLED            │
//! │  CoreError::Storage ──── logged, generic ───► 500 DATABASE_ERROR       │
//! │  DbError (begin/commit) ─ via CoreError ────► same table               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Body
//! ```json
//! { "code": "REFERENCED_NOT_FOUND", "message": "author not found: a2", "missing": ["a2"] }
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookstore_core::CoreError;
use bookstore_db::DbError;
use serde::Serialize;
use tracing::{debug, error};

/// Error returned from HTTP handlers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Referenced ids that do not exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Referenced author/category does not exist (400)
    ReferencedNotFound,

    /// Resource not found (404)
    NotFound,

    /// Identifier already taken (409)
    Conflict,

    /// Request cancelled or timed out (503)
    Cancelled,

    /// Database operation failed (500)
    DatabaseError,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationError | ErrorCode::ReferencedNotFound => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            missing: None,
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

/// Converts workflow errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::ReferencedNotFound { ref missing, .. } => ApiError {
                code: ErrorCode::ReferencedNotFound,
                message: err.to_string(),
                missing: Some(missing.clone()),
            },
            CoreError::NotFound { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::Duplicate { .. } => ApiError::new(ErrorCode::Conflict, err.to_string()),
            CoreError::Cancelled => ApiError::new(ErrorCode::Cancelled, "Request cancelled"),
            CoreError::Storage(source) => {
                // Log the actual error but return a generic message
                error!(error = %source, "Storage failure");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts database errors raised outside a workflow (begin, commit).
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        ApiError::from(CoreError::from(err))
    }
}

/// Malformed or non-JSON request bodies.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection, "Rejected request body");
        ApiError::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_core::ValidationError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                CoreError::Validation(ValidationError::Required { field: "name".into() }),
                StatusCode::BAD_REQUEST,
            ),
            (
                CoreError::referenced_not_found("author", vec!["a2".into()]),
                StatusCode::BAD_REQUEST,
            ),
            (CoreError::not_found("book title", "x"), StatusCode::NOT_FOUND),
            (CoreError::duplicate("book title", "x"), StatusCode::CONFLICT),
            (CoreError::Cancelled, StatusCode::SERVICE_UNAVAILABLE),
            (
                CoreError::from(DbError::PoolExhausted),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_referenced_not_found_body() {
        let err = ApiError::from(CoreError::referenced_not_found(
            "author",
            vec!["a2".into(), "a3".into()],
        ));
        let body = serde_json::to_value(&err).unwrap();

        assert_eq!(body["code"], "REFERENCED_NOT_FOUND");
        assert_eq!(body["message"], "author not found: a2, a3");
        assert_eq!(body["missing"], serde_json::json!(["a2", "a3"]));
    }

    #[test]
    fn test_storage_detail_is_not_leaked() {
        let err = ApiError::from(DbError::QueryFailed("disk I/O error".into()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("disk"));
        assert!(serde_json::to_value(&err).unwrap().get("missing").is_none());
    }
}
