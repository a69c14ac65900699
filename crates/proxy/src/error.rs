//! Unified error handling for the proxy.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gift_redeem_core::ResolutionResult;
use serde_json::json;
use thiserror::Error;

use crate::services::redemption::{BackendError, ResolveError, UPSTREAM_ERROR_MESSAGE};

/// Application-level error type for the proxy.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request carried no usable code.
    #[error("No code provided")]
    MissingCode,

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// App proxy signature missing or wrong.
    #[error("Unauthorized: invalid app proxy signature")]
    InvalidSignature,

    /// Standard code lookup failed upstream.
    #[error("Upstream error: {0}")]
    Upstream(#[source] BackendError),
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::MissingCode => Self::MissingCode,
            ResolveError::Upstream(e) => Self::Upstream(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Upstream(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Proxy request error"
            );
        }

        // Don't expose internal error details to clients
        match self {
            Self::MissingCode => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            Self::InvalidSignature => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            Self::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            Self::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ResolutionResult::invalid(UPSTREAM_ERROR_MESSAGE)),
            )
                .into_response(),
        }
    }
}
