//! Error types for Frete API.
//!
//! ## Response Shapes
//! ```text
//! ┌──────────────────────┬────────┬─────────────────────────────────────────┐
//! │ Variant              │ Status │ Body                                    │
//! ├──────────────────────┼────────┼─────────────────────────────────────────┤
//! │ Validation           │  400   │ { error: "Invalid input", details: [] } │
//! │ BadRequest           │  400   │ { error: "<reason>", success: false }   │
//! │ Internal             │  500   │ { error: "Internal error",              │
//! │                      │        │   success: false }                      │
//! └──────────────────────┴────────┴─────────────────────────────────────────┘
//! ```
//!
//! Internal failures are logged with their cause; the caller only ever sees
//! the generic message.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use frete_core::{CoreError, ValidationErrors};
use serde::Serialize;
use tracing::error;

/// Frete API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body parsed but violated field constraints.
    #[error("Invalid input: {0}")]
    Validation(ValidationErrors),

    /// The request body could not be read as a quote request at all.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The engine broke its own contract. Never shown to the caller.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Body for a rejected request.
#[derive(Debug, Serialize)]
pub struct InvalidInputBody {
    pub error: &'static str,
    pub details: Vec<String>,
}

/// Body for any other failure.
#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub error: String,
    pub success: bool,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(errors) => ApiError::Validation(errors),
            other @ CoreError::InvalidQuote { .. } => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation(errors) => (
                status,
                Json(InvalidInputBody {
                    error: "Invalid input",
                    details: errors.details(),
                }),
            )
                .into_response(),
            ApiError::BadRequest(reason) => (
                status,
                Json(FailureBody {
                    error: reason,
                    success: false,
                }),
            )
                .into_response(),
            ApiError::Internal(cause) => {
                error!(%cause, "Quote calculation failed");
                (
                    status,
                    Json(FailureBody {
                        error: "Internal error".to_string(),
                        success: false,
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frete_core::ValidationError;

    #[test]
    fn test_core_error_mapping() {
        let errors: ValidationErrors = ValidationError::Required {
            field: "cepDestino".to_string(),
        }
        .into();
        let api: ApiError = CoreError::Validation(errors).into();
        assert!(matches!(api, ApiError::Validation(_)));
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);

        let api: ApiError = CoreError::InvalidQuote {
            service: "Express".to_string(),
            reason: "price is negative".to_string(),
        }
        .into();
        assert!(matches!(api, ApiError::Internal(_)));
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_bad_request_status() {
        let api = ApiError::BadRequest("Failed to parse the request body as JSON".to_string());
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert_eq!(api.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
