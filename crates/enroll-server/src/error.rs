// ABOUTME: Request-level error type for the editor API and its mapping onto HTTP responses.
// ABOUTME: Every failure ends its request; the body is the plain-text error message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use enroll_core::ValidationError;
use enroll_store::StoreError;
use thiserror::Error;

/// Errors a handler can end a request with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to load the editor page: {0}")]
    Page(std::io::Error),

    #[error("failed to read configuration: {0}")]
    Load(StoreError),

    #[error("failed to parse configuration: {0}")]
    Decode(serde_json::Error),

    #[error("configuration validation failed: {0}")]
    Invalid(ValidationError),

    #[error("failed to save configuration: {0}")]
    Save(StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Decode(_) | ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::Page(_) | ApiError::Load(_) | ApiError::Save(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }
        (status, self.to_string()).into_response()
    }
}
