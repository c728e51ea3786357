use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{ConfigError, PulseConfig};
use crate::pulse::PulseMonitor;

/// Key lookup the handler reads its configuration through
pub type ConfigLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Application state shared across handlers
pub struct AppState {
    pub config_lookup: ConfigLookup,
    pub http_client: reqwest::Client,
}

impl AppState {
    /// State that reads the process environment on every request
    pub fn from_env() -> Self {
        Self {
            config_lookup: Arc::new(|key: &str| std::env::var(key).ok()),
            http_client: reqwest::Client::new(),
        }
    }

    /// State backed by a fixed map
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self {
            config_lookup: Arc::new(move |key: &str| values.get(key).cloned()),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn load_config(&self) -> Result<PulseConfig, ConfigError> {
        PulseConfig::from_lookup(|key| (self.config_lookup)(key))
    }
}

// ============================================================================
// Cron check
// ============================================================================

#[derive(Serialize)]
pub struct CronResponse {
    pub status: &'static str,
    pub message: String,
}

pub async fn cron_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CronResponse>, ApiError> {
    let config = state.load_config().map_err(|e| {
        tracing::error!(error = %e, "Refusing pulse check");
        ApiError::Config(e)
    })?;

    let monitor = PulseMonitor::with_client(&config, state.http_client.clone());
    let outcome = monitor.check(Utc::now()).await;

    Ok(Json(CronResponse {
        status: "success",
        message: outcome.summary,
    }))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    Config(ConfigError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Config(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}
