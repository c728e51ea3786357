//! CodePulse CLI
//!
//! Run once from a scheduler: cargo run
//!
//! Environment variables:
//! - GITHUB_USERNAME: GitHub user to monitor (required)
//! - GITHUB_TOKEN: API token, raises the rate limit (optional)
//! - WEBHOOK_URL: Generic webhook receiving `{"content": ...}` (optional)
//! - TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID: Telegram bot sink, both required to enable it
//! - RUST_LOG: Log level (default: codepulse=info)
//!
//! Variables may also come from a `.env` file in the working directory.
//!
//! Exits with status 1 when GITHUB_USERNAME is missing, 0 otherwise.

use std::process::ExitCode;

use codepulse::cli::run_cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // A local .env file is optional
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codepulse=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run_cli(
        |key| std::env::var(key).ok(),
        &mut std::io::stdout(),
        chrono::Utc::now(),
    )
    .await
}
