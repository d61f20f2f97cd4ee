//! API error types for oficio-ui
//!
//! Every failure maps to a stable prior state: validation errors change
//! nothing, backend failures leave the flow back in idle and the tables
//! untouched.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Conflict (409) - e.g., an extraction is already pending
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Extraction backend failure (502)
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// Rendering backend failure (502)
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<oficio_common::Error> for ApiError {
    fn from(err: oficio_common::Error) -> Self {
        match err {
            oficio_common::Error::Validation(msg) => ApiError::BadRequest(msg),
            oficio_common::Error::NotFound(msg) => ApiError::NotFound(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::Extraction(msg) => (StatusCode::BAD_GATEWAY, "EXTRACTION_FAILED", msg),
            ApiError::Generation(msg) => (StatusCode::BAD_GATEWAY, "GENERATION_FAILED", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::Conflict("x".into()), StatusCode::CONFLICT),
            (ApiError::Extraction("x".into()), StatusCode::BAD_GATEWAY),
            (ApiError::Generation("x".into()), StatusCode::BAD_GATEWAY),
            (
                ApiError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_common_error_conversion() {
        let converted: ApiError = oficio_common::Error::Validation("missing".into()).into();
        assert!(matches!(converted, ApiError::BadRequest(_)));

        let converted: ApiError = oficio_common::Error::NotFound("idx".into()).into();
        assert!(matches!(converted, ApiError::NotFound(_)));

        let converted: ApiError = oficio_common::Error::Internal("boom".into()).into();
        assert!(matches!(converted, ApiError::Internal(_)));
    }
}
