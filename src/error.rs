//! Application error type shared across all layers.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Error taxonomy for the link core.
///
/// Every fallible operation in the crate returns this type. Variants map
/// one-to-one onto HTTP status codes in [`IntoResponse`]:
///
/// - `Validation` - malformed input, rejected before touching the store (400)
/// - `NotFound` - alias absent at read/update/delete time (404)
/// - `Conflict` - unique-constraint violation, e.g. a taken alias (409)
/// - `Unauthorized` - access denied; the body never says why (401)
/// - `AllocationExhausted` - alias generation ran out of retries (503)
/// - `Internal` - store or other infrastructure failure (500)
#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
    Unauthorized,
    AllocationExhausted { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    /// Uniform denial. Carries no message or details on purpose: the response
    /// must look the same whether the caller is anonymous, unknown, or simply
    /// not the owner, so ownership information cannot leak.
    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn allocation_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::AllocationExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    fn parts(self) -> (StatusCode, &'static str, String, Value) {
        match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
                json!({}),
            ),
            AppError::AllocationExhausted { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "allocation_exhausted",
                message,
                details,
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation { message, .. } => write!(f, "validation_error: {message}"),
            AppError::NotFound { message, .. } => write!(f, "not_found: {message}"),
            AppError::Conflict { message, .. } => write!(f, "conflict: {message}"),
            AppError::Unauthorized => write!(f, "unauthorized"),
            AppError::AllocationExhausted { message, .. } => {
                write!(f, "allocation_exhausted: {message}")
            }
            AppError::Internal { message, .. } => write!(f, "internal_error: {message}"),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let unauthorized = matches!(self, AppError::Unauthorized);
        let (status, code, message, details) = self.parts();

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        let mut response = (status, Json(body)).into_response();
        if unauthorized {
            // RFC 6750 challenge for bearer-token consumers.
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    AppError::internal("Database error", json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_message() {
        let err = AppError::bad_request("bad input", json!({}));
        assert_eq!(err.to_string(), "validation_error: bad input");
    }

    #[test]
    fn test_unauthorized_is_uniform() {
        let err = AppError::unauthorized();
        assert_eq!(err.to_string(), "unauthorized");
    }

    #[test]
    fn test_is_not_found() {
        assert!(AppError::not_found("gone", json!({})).is_not_found());
        assert!(!AppError::conflict("taken", json!({})).is_not_found());
    }

    #[test]
    fn test_is_conflict() {
        assert!(AppError::conflict("taken", json!({})).is_conflict());
        assert!(!AppError::internal("boom", json!({})).is_conflict());
    }

    #[test]
    fn test_allocation_exhausted_is_not_a_conflict() {
        let err = AppError::allocation_exhausted("retries exhausted", json!({}));
        assert!(!err.is_conflict());
    }
}
