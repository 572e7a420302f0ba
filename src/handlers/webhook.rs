//! Webhook verification and event dispatch.
//!
//! Every request passes through the same gate: the claimed signature is
//! checked against the raw body bytes before anything looks at the event
//! type or parses the payload. A request is therefore in exactly one of
//! three terminal states after verification: ping, pull-request, or
//! unhandled.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::{
    error::ReceiverError,
    event::{EventKind, PullRequestEvent},
    server::AppState,
    signature::verify_signature,
};

/// Receives a webhook delivery.
///
/// Verifies the `X-Hub-Signature-256` header over the exact raw body
/// bytes, then dispatches on `X-GitHub-Event`. An absent event header is
/// treated as a ping.
///
/// # Errors
///
/// - 403 when the signature is invalid or no secret is configured
/// - 400 when a pull-request body cannot be parsed
#[instrument(
    name = "receive_webhook",
    skip(state, headers, body),
    fields(
        event = headers.get("x-github-event").and_then(|v| v.to_str().ok()).unwrap_or("ping"),
        content_length = body.len(),
    )
)]
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ReceiverError> {
    let claimed = extract_signature(&headers);

    // Authentication gates everything: no event-type branching and no
    // payload parsing happens on an unverified request.
    if !verify_signature(state.secret(), &body, claimed) {
        warn!("rejecting delivery with invalid signature");
        return Err(ReceiverError::InvalidSignature);
    }

    let event = EventKind::from_header(extract_event_type(&headers));

    match event {
        EventKind::Ping => {
            info!("webhook connected successfully (ping event)");
            Ok((StatusCode::OK, Json(json!({ "message": "pong" }))).into_response())
        },
        EventKind::PullRequest => handle_pull_request(&body),
        EventKind::Other(name) => {
            info!(event = %name, "unhandled event type");
            Ok((StatusCode::OK, Json(json!({ "message": "Event ignored" }))).into_response())
        },
    }
}

/// Handles a verified pull-request event.
///
/// Logs the action, title, and author. This is the extension point for
/// further pull-request processing; no business logic lives here yet.
fn handle_pull_request(body: &[u8]) -> Result<Response, ReceiverError> {
    let event: PullRequestEvent = serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "pull request payload could not be parsed");
        ReceiverError::MalformedPayload(e.to_string())
    })?;

    info!(
        action = %event.action,
        title = %event.pull_request.title,
        author = %event.pull_request.user.login,
        "pull request event received"
    );

    Ok((StatusCode::OK, Json(json!({ "status": "PR event received" }))).into_response())
}

/// Extracts the claimed signature header value.
///
/// An absent or non-ASCII header yields the empty string, which can never
/// verify.
fn extract_signature(headers: &HeaderMap) -> &str {
    headers.get("x-hub-signature-256").and_then(|v| v.to_str().ok()).unwrap_or("")
}

/// Extracts the event-type indicator, if present.
fn extract_event_type(headers: &HeaderMap) -> Option<&str> {
    headers.get("x-github-event").and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn extract_signature_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-hub-signature-256", HeaderValue::from_static("sha256=abc123"));

        assert_eq!(extract_signature(&headers), "sha256=abc123");
    }

    #[test]
    fn extract_signature_defaults_to_empty() {
        let headers = HeaderMap::new();
        assert_eq!(extract_signature(&headers), "");
    }

    #[test]
    fn extract_event_type_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("X-GitHub-Event", HeaderValue::from_static("pull_request"));

        assert_eq!(extract_event_type(&headers), Some("pull_request"));
    }

    #[test]
    fn handle_pull_request_rejects_invalid_json() {
        let result = handle_pull_request(b"not json");
        assert!(matches!(result, Err(ReceiverError::MalformedPayload(_))));
    }

    #[test]
    fn handle_pull_request_rejects_missing_fields() {
        let result = handle_pull_request(br#"{"action":"opened"}"#);
        assert!(matches!(result, Err(ReceiverError::MalformedPayload(_))));
    }
}
