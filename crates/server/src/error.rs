//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`.
//!
//! Every failure is reported through the HTTP status code, with a JSON body of
//! the form `{ "error": "<message>" }`. Handlers never answer 200 with an
//! error payload.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::TrackerError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Tracker operation failed.
    #[error(transparent)]
    Tracker(#[from] TrackerError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message, safe to show to clients.
    pub error: String,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Tracker(err) => match err {
                TrackerError::InvalidUsername(_)
                | TrackerError::InvalidDescription(_)
                | TrackerError::InvalidDuration(_)
                | TrackerError::InvalidDate(_) => StatusCode::BAD_REQUEST,
                TrackerError::UserNotFound => StatusCode::NOT_FOUND,
                TrackerError::UsernameTaken => StatusCode::CONFLICT,
                TrackerError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    const fn is_server_error(&self) -> bool {
        matches!(self, Self::Tracker(TrackerError::Repository(_)))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let message = match &self {
            _ if self.is_server_error() => "Internal server error".to_owned(),
            Self::Tracker(err) => err.to_string(),
            Self::NotFound(_) => "Not found".to_owned(),
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
