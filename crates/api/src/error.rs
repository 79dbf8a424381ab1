//! API error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use visasite_shared::{DomainError, FormatError, LocaleError};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // Validation errors
    #[error("{0}")]
    Validation(String),

    // Resource errors
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    // Internal errors
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::UnknownLocale(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        json_error(self.to_string(), status)
    }
}

/// `{"error": true, "message": ...}` body used by every failing endpoint
pub fn json_error(message: impl Into<String>, status: StatusCode) -> Response {
    let body = Json(json!({
        "error": true,
        "message": message.into(),
    }));

    (status, body).into_response()
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<FormatError> for ApiError {
    fn from(err: FormatError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<LocaleError> for ApiError {
    fn from(err: LocaleError) -> Self {
        match err {
            LocaleError::UnknownLocale(code) => ApiError::UnknownLocale(code),
            LocaleError::MalformedEntry(_) => ApiError::Internal,
        }
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
