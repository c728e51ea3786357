//! The pulse check pipeline shared by the CLI and the HTTP handler

use chrono::{DateTime, Utc};

use super::evaluator::{evaluate, PulseStatus};
use crate::alerts::{DeliveryReport, Notifier, SinkSet};
use crate::config::PulseConfig;
use crate::github::{ActivityEvent, GitHubClient};

pub const NO_PUSH_SUMMARY: &str = "No recent push events found.";
pub const ALERT_SENT_SUFFIX: &str = " Alert sent.";
pub const HEALTHY_SUFFIX: &str = " Pulse is strong. Keep coding! 🚀";

/// Everything one pulse check produced
#[derive(Debug)]
pub struct CheckOutcome {
    pub username: String,
    pub status: PulseStatus,
    /// Human-readable summary for the caller
    pub summary: String,
    /// Alert text sent to the sinks, when flatlined
    pub alert: Option<String>,
    pub deliveries: Vec<DeliveryReport>,
}

impl CheckOutcome {
    pub fn is_flatlined(&self) -> bool {
        self.status.is_flatlined()
    }
}

/// Runs fetch, evaluate and notify for one configured user
pub struct PulseMonitor {
    username: String,
    github: GitHubClient,
    notifier: Notifier,
    sinks: SinkSet,
}

impl PulseMonitor {
    pub fn new(config: &PulseConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Build a monitor around an existing HTTP client
    pub fn with_client(config: &PulseConfig, client: reqwest::Client) -> Self {
        Self {
            username: config.username.clone(),
            github: GitHubClient::from_config(client.clone(), config),
            notifier: Notifier::new(client),
            sinks: SinkSet::from_config(config),
        }
    }

    /// Run one check against `now`.
    ///
    /// Upstream failures never escape: a failed fetch or an unreadable
    /// timestamp counts as "no push found", and delivery failures are only
    /// recorded in the outcome.
    pub async fn check(&self, now: DateTime<Utc>) -> CheckOutcome {
        let event = self.fetch_latest_push().await;

        let status = match evaluate(event.as_ref(), now) {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(
                    username = %self.username,
                    error = %e,
                    "Unreadable push timestamp, treating as no push"
                );
                PulseStatus::Flatlined { last_push: None }
            }
        };

        let mut summary = summarize(&status);
        let alert = status.is_flatlined().then(|| alert_message(&status));

        let deliveries = match &alert {
            Some(message) => {
                tracing::warn!(username = %self.username, "Pulse is flat, sending alert");
                let reports = self.notifier.notify_all(&self.sinks, message).await;
                summary.push_str(ALERT_SENT_SUFFIX);
                reports
            }
            None => {
                summary.push_str(HEALTHY_SUFFIX);
                Vec::new()
            }
        };

        tracing::info!(username = %self.username, "{}", summary);

        CheckOutcome {
            username: self.username.clone(),
            status,
            summary,
            alert,
            deliveries,
        }
    }

    async fn fetch_latest_push(&self) -> Option<ActivityEvent> {
        match self.github.latest_push_event(&self.username).await {
            Ok(Some(event)) => {
                tracing::debug!(
                    username = %self.username,
                    created_at = %event.created_at,
                    repo = event.repo_name().unwrap_or("-"),
                    "Found latest push event"
                );
                Some(event)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(
                    username = %self.username,
                    error = %e,
                    "Error fetching GitHub events"
                );
                None
            }
        }
    }
}

/// Alert text sent to the sinks
pub fn alert_message(status: &PulseStatus) -> String {
    match status.hours_since() {
        Some(hours) => format!(
            "⚠️ CodePulse Alert: Your coding pulse is flat — last push was {}h ago.",
            hours.trunc() as i64
        ),
        None => "⚠️ CodePulse Alert: Your coding pulse is flat — no recent push events found."
            .to_string(),
    }
}

/// Summary without the trailing verdict
fn summarize(status: &PulseStatus) -> String {
    match (status.hours_since(), status.last_push_at()) {
        (Some(hours), Some(at)) => format!(
            "Last push was {:.1} hours ago at {} UTC.",
            hours,
            at.format("%Y-%m-%d %H:%M:%S")
        ),
        _ => NO_PUSH_SUMMARY.to_string(),
    }
}
