//! HTTP server configuration and request routing.
//!
//! Provides Axum server setup with the middleware stack and graceful
//! shutdown. Requests flow through middleware in order:
//! 1. Request ID generation
//! 2. Request/response logging
//! 3. Timeout enforcement
//! 4. Handler execution
//!
//! # Graceful Shutdown
//!
//! The server handles SIGTERM and CTRL+C gracefully: it stops accepting
//! new connections and lets in-flight requests finish.

use std::{fmt, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{config::Config, handlers};

/// Default request timeout when none is configured.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state.
///
/// Holds the immutable webhook secret loaded once at process start. This
/// is the only state shared between requests; everything else is
/// request-scoped.
#[derive(Clone)]
pub struct AppState {
    secret: Arc<str>,
    request_timeout: Duration,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("secret", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl AppState {
    /// Creates state with the given secret and the default timeout.
    ///
    /// An empty secret means "not configured": every delivery will fail
    /// verification.
    pub fn new(secret: impl AsRef<str>) -> Self {
        Self { secret: Arc::from(secret.as_ref()), request_timeout: DEFAULT_REQUEST_TIMEOUT }
    }

    /// Creates state from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            secret: Arc::from(config.github_webhook_secret.as_str()),
            request_timeout: Duration::from_secs(config.request_timeout),
        }
    }

    /// Returns the shared secret as raw bytes.
    pub fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

/// Creates the Axum router with all routes and middleware.
///
/// Sets up the webhook endpoint, health probes, request tracing, and
/// timeout handling.
///
/// # Example
///
/// ```
/// use hubhook::{create_router, AppState};
///
/// let app = create_router(AppState::new("my_secret"));
/// // Serve the app...
/// ```
pub fn create_router(state: AppState) -> Router {
    let timeout = state.request_timeout;

    Router::new()
        .route("/webhook", post(handlers::receive_webhook))
        .route("/health", get(handlers::health_check))
        .route("/live", get(handlers::liveness_check))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(inject_request_id))
        .with_state(state)
}

/// Middleware to inject a request ID into all responses.
///
/// Adds an `X-Request-Id` header for tracing requests across services.
async fn inject_request_id(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let mut req = req;
    req.extensions_mut().insert(request_id.clone());

    let mut response = next.run(req).await;

    if let Ok(header_value) = request_id.parse() {
        response.headers_mut().insert("X-Request-Id", header_value);
    }

    response
}

/// Starts the HTTP server with graceful shutdown support.
///
/// Binds to the specified address and serves requests until a shutdown
/// signal is received.
///
/// # Errors
///
/// Returns `std::io::Error` if the port is already in use or the network
/// interface is unavailable.
pub async fn start_server(state: AppState, addr: SocketAddr) -> Result<(), std::io::Error> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("HTTP server listening on {}", actual_addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("HTTP server stopped gracefully");
    Ok(())
}

/// Waits for shutdown signal (CTRL+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received CTRL+C, starting graceful shutdown");
        },
        () = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }

    warn!("Waiting for in-flight requests to complete");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_exposes_secret_bytes() {
        let state = AppState::new("abc");
        assert_eq!(state.secret(), b"abc");
    }

    #[test]
    fn debug_output_redacts_secret() {
        let state = AppState::new("topsecret");
        assert!(!format!("{state:?}").contains("topsecret"));
    }

    #[test]
    fn state_from_config_carries_timeout() {
        let mut config = Config::default();
        config.github_webhook_secret = "s3cret".to_string();
        config.request_timeout = 5;

        let state = AppState::from_config(&config);

        assert_eq!(state.secret(), b"s3cret");
        assert_eq!(state.request_timeout, Duration::from_secs(5));
    }
}
