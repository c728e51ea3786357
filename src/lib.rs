//! CodePulse: a coding pulse monitor
//!
//! Polls the GitHub public event feed for one user, finds the most recent
//! push, and alerts a webhook and/or a Telegram bot when more than 24 hours
//! have passed without one.
//!
//! Each check is stateless: configuration is loaded per invocation and the
//! result depends only on the current time and the upstream responses.
//! Alerts are re-sent on every check while the pulse stays flat.
//!
//! # Example
//!
//! ```no_run
//! use codepulse::config::PulseConfig;
//! use codepulse::pulse::PulseMonitor;
//!
//! # async fn run() -> Result<(), codepulse::ConfigError> {
//! let config = PulseConfig::from_env()?;
//! let outcome = PulseMonitor::new(&config).check(chrono::Utc::now()).await;
//! println!("{}", outcome.summary);
//! # Ok(())
//! # }
//! ```

pub mod alerts;
pub mod api;
pub mod cli;
pub mod config;
pub mod github;
pub mod pulse;

// Re-export commonly used types
pub use config::{ConfigError, PulseConfig};
pub use pulse::{evaluate, CheckOutcome, PulseMonitor, PulseStatus};
