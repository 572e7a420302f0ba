//! Error types for webhook request handling.
//!
//! Every failure is surfaced directly in the HTTP response plus one log
//! line; nothing is retried. The taxonomy is small: authentication
//! failures (which also cover a missing secret, since verification can
//! never succeed without one) and payloads that cannot be parsed where
//! structured data is expected.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Request-scoped errors for the webhook endpoint.
#[derive(Debug, Error)]
pub enum ReceiverError {
    /// Signature verification failed, or no secret is configured.
    #[error("invalid webhook signature")]
    InvalidSignature,

    /// Body could not be parsed where structured data was expected.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl IntoResponse for ReceiverError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidSignature => (StatusCode::FORBIDDEN, "Invalid signature"),
            Self::MalformedPayload(_) => (StatusCode::BAD_REQUEST, "Malformed payload"),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
