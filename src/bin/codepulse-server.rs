//! CodePulse HTTP handler
//!
//! Serves `GET /api/cron`, which runs one pulse check per request. Point a
//! scheduler (cron, a serverless cron trigger) at it.
//!
//! Environment variables:
//! - CODEPULSE_HOST: Bind address (default: 0.0.0.0)
//! - CODEPULSE_PORT: Port number (default: 3000)
//! - RUST_LOG: Log level (default: codepulse=info,tower_http=info)
//!
//! The check itself reads GITHUB_USERNAME, GITHUB_TOKEN, WEBHOOK_URL,
//! TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID on every request.

use codepulse::api::{run_server, AppState, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codepulse=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    run_server(ServerConfig::from_env(), AppState::from_env()).await
}
