//! Error types for the Auth API service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use latchkey_auth_core::AuthError;
use serde::Serialize;

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("The session is invalid.")]
    InvalidSession,

    #[error("The user must not be authenticated.")]
    GuestOnly,

    #[error("The remember token is invalid.")]
    InvalidRememberToken,

    #[error("The body of the request is invalid.")]
    InvalidRequest,

    #[error("The request contains invalid data.")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidSession | Self::GuestOnly | Self::InvalidRememberToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::InvalidRequest | Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(e) => StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSession => "INVALID_SESSION",
            Self::GuestOnly => "GUEST_ONLY",
            Self::InvalidRememberToken => "INVALID_REMEMBER_TOKEN",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Auth(e) if e.is_client_error() => e.error_code(),
            Self::Auth(_) => "INTERNAL_ERROR",
        }
    }

    fn is_internal(&self) -> bool {
        match self {
            Self::Internal(_) => true,
            Self::Auth(e) => !e.is_client_error(),
            _ => false,
        }
    }

    /// Client-facing message; server faults never leak their cause
    fn message(&self) -> String {
        match self {
            Self::Auth(AuthError::UserNotFound) => "The user was not found.".to_string(),
            Self::Auth(AuthError::InvalidPassword) => "The password is invalid.".to_string(),
            Self::Auth(AuthError::InvalidSession) => Self::InvalidSession.to_string(),
            _ if self.is_internal() => "There was an error processing the request.".to_string(),
            _ => self.to_string(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        // Log internal errors
        if self.is_internal() {
            tracing::error!(error = ?self, "Internal API error");
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.message(),
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
