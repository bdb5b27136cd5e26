//! Error types for the summarizer
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == App Error Enum ==
/// Unified error type for validation, services, cache and configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// User input rejected before any costed call
    #[error("{0}")]
    Validation(String),

    /// External service failure, never cached
    #[error("{0}")]
    Service(String),

    /// Missing or broken credentials, fatal at startup
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Arguments could not be encoded into a cache key
    #[error("Cache key encoding failed: {0}")]
    KeyEncoding(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns true for errors the caller can fix by changing their input.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Service("⚠️ The request timed out. Please try again.".to_string())
        } else {
            AppError::Service(format!("⚠️ Network error: {}", err))
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Service(format!("⚠️ I/O error: {}", err))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Service(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::KeyEncoding(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the summarizer.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = AppError::Validation("⚠️ Text must be at least 10 characters long.".into());
        assert_eq!(
            err.to_string(),
            "⚠️ Text must be at least 10 characters long."
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Service("x".into()), StatusCode::BAD_GATEWAY),
            (
                AppError::Configuration("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::KeyEncoding("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
