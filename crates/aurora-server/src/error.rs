//! Error types for the coordinator API layer.
//!
//! [`ApiError`] unifies the few failure modes that can actually reach a
//! client into a single enum with an
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Note
//! that an unrecognized code is NOT an error: validation failures are
//! reported as `success = false` in a 200 response, matching the
//! reference behavior.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the coordinator API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// QR image rendering failed for the printable sheet.
    #[error("QR generation failed: {0}")]
    QrRender(String),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::QrRender(msg) | Self::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            Self::Serialization(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("JSON error: {e}"))
            }
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
