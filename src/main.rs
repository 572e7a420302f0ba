//! Hubhook webhook receiver.
//!
//! Main entry point. Initializes tracing, loads configuration, and serves
//! the webhook endpoint until shutdown.

use anyhow::Result;
use hubhook::{AppState, Config};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("Starting hubhook webhook receiver");

    let config = Config::load()?;
    if !config.secret_configured() {
        warn!("GITHUB_WEBHOOK_SECRET is not set; all deliveries will be rejected");
    }

    let addr = config.parse_server_addr()?;
    let state = AppState::from_config(&config);

    info!(addr = %addr, "Webhook receiver is ready");

    hubhook::start_server(state, addr).await?;

    info!("Shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,hubhook=debug,tower_http=debug"))
        .expect("Invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
