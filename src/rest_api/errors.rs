//! # REST API Errors
//!
//! Error types for the REST API module.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

use super::response::format_timestamp;

/// Result type for REST operations
pub type ApiResult<T> = Result<T, ApiError>;

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// The `:id` path segment is not a positive integer
    #[error("User ID must be a positive integer")]
    InvalidUserId,

    /// Missing or malformed request fields, body or query
    #[error("{0}")]
    Validation(String),

    /// Email already used by another record
    #[error("Email already exists")]
    Conflict,

    /// No record with this id
    #[error("User with ID {0} not found")]
    UserNotFound(u64),

    /// No route matched
    #[error("Route {0} not found")]
    RouteNotFound(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Unexpected failure; the message is passed through to the client
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidUserId => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::UserNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label placed in the `error` field of the envelope
    pub fn label(&self) -> &'static str {
        match self {
            ApiError::InvalidUserId => "Invalid user ID",
            ApiError::Validation(_) => "Bad Request",
            ApiError::Conflict => "Conflict",
            ApiError::UserNotFound(_) | ApiError::RouteNotFound(_) => "Not Found",
            ApiError::Internal(_) => "Internal Server Error",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::UserNotFound(id),
            StoreError::EmailTaken(_) => ApiError::Conflict,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.label().to_string(),
            message: err.to_string(),
            timestamp: format_timestamp(Utc::now()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::InvalidUserId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Validation("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(ApiError::UserNotFound(1).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_mapping() {
        let err = ApiError::from(StoreError::NotFound(9));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "User with ID 9 not found");

        let err = ApiError::from(StoreError::EmailTaken("a@b.co".to_string()));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_error_envelope() {
        let body = ErrorResponse::from(&ApiError::RouteNotFound("/nope".to_string()));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["error"], "Not Found");
        assert_eq!(json["message"], "Route /nope not found");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_error_timestamp_uses_millis_and_z() {
        let body = ErrorResponse::from(&ApiError::Conflict);

        // e.g. 2024-01-01T00:00:00.000Z
        assert_eq!(body.timestamp.len(), 24);
        assert!(body.timestamp.ends_with('Z'));
        assert_eq!(&body.timestamp[19..20], ".");
        assert!(chrono::DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
    }
}
