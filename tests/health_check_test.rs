//! Health and liveness endpoint tests.
//!
//! Verifies that the probes respond quickly with well-formed JSON and do
//! not depend on webhook configuration.

use anyhow::Result;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use hubhook::{create_router, AppState};
use serde_json::Value;
use tower::ServiceExt;

async fn get_json(uri: &str, secret: &str) -> Result<(StatusCode, Value)> {
    let app = create_router(AppState::new(secret));
    let request = Request::builder().method("GET").uri(uri).body(Body::empty())?;

    let response = app.oneshot(request).await?;
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

/// The health endpoint reports healthy with a status and version.
#[tokio::test]
async fn health_check_returns_success() -> Result<()> {
    let (status, body) = get_json("/health", "secret").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body.get("timestamp").is_some(), "health check should include a timestamp");
    assert!(body.get("version").is_some(), "health check should include the version");
    Ok(())
}

/// The liveness endpoint confirms the process is responding.
#[tokio::test]
async fn liveness_check_returns_alive() -> Result<()> {
    let (status, body) = get_json("/live", "secret").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");
    Ok(())
}

/// Probes respond even when no webhook secret is configured; only webhook
/// deliveries are gated on the secret.
#[tokio::test]
async fn probes_do_not_require_secret() -> Result<()> {
    let (health_status, _) = get_json("/health", "").await?;
    let (live_status, _) = get_json("/live", "").await?;

    assert_eq!(health_status, StatusCode::OK);
    assert_eq!(live_status, StatusCode::OK);
    Ok(())
}

/// POST is not a supported method on the health endpoint.
#[tokio::test]
async fn health_check_rejects_post() -> Result<()> {
    let app = create_router(AppState::new("secret"));
    let request = Request::builder().method("POST").uri("/health").body(Body::empty())?;

    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}
