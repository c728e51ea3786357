//! One-shot CLI run: load config, check the pulse, report on stdout

use std::io::Write;
use std::process::ExitCode;

use chrono::{DateTime, Utc};

use crate::config::PulseConfig;
use crate::pulse::PulseMonitor;

pub const NO_PUSH_PROGRESS: &str = "No PushEvents found in recent public activity.";

/// Run one check and write progress lines to `out`.
///
/// Exits 1 without touching the network when the username is missing,
/// 0 otherwise.
pub async fn run_cli<F, W>(lookup: F, out: &mut W, now: DateTime<Utc>) -> ExitCode
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    match run(lookup, out, now).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Failed to write CLI output");
            ExitCode::FAILURE
        }
    }
}

async fn run<F, W>(lookup: F, out: &mut W, now: DateTime<Utc>) -> std::io::Result<ExitCode>
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    let config = match PulseConfig::from_lookup(lookup) {
        Ok(config) => config,
        Err(e) => {
            writeln!(out, "Error: {}.", e)?;
            return Ok(ExitCode::from(1));
        }
    };

    writeln!(out, "Checking GitHub activity for user: {}...", config.username)?;

    let outcome = PulseMonitor::new(&config).check(now).await;
    if outcome.status.last_push_at().is_none() {
        writeln!(out, "{}", NO_PUSH_PROGRESS)?;
    }
    writeln!(out, "{}", outcome.summary)?;

    Ok(ExitCode::SUCCESS)
}
