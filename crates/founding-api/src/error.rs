//! Error types for the JSON query surface.
//!
//! [`ApiError`] converts into an HTTP response with a JSON body via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. A
//! window that cannot be assembled is always an error response, never a
//! partial result.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use founding_core::{BackfillError, WindowError};

/// Errors returned by the query endpoints.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The upstream feed failed while assembling the window.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// A local failure (cache, calendar range) prevented the window.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<WindowError> for ApiError {
    fn from(error: WindowError) -> Self {
        match &error {
            WindowError::Backfill(
                BackfillError::Fetch { .. } | BackfillError::Stalled { .. },
            ) => Self::Upstream(error.to_string()),
            WindowError::Backfill(BackfillError::Cache { .. }) | WindowError::OutOfRange { .. } => {
                Self::Internal(error.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        tracing::warn!(status = status.as_u16(), error = %message, "request failed");

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
