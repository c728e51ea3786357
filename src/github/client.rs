use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};

use super::model::{latest_push, ActivityEvent};
use crate::config::PulseConfig;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const CLIENT_USER_AGENT: &str = concat!("codepulse/", env!("CARGO_PKG_VERSION"));

/// Client for the GitHub public events API
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http_client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(http_client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            http_client,
            api_url: api_url.into(),
            token: None,
        }
    }

    pub fn from_config(http_client: reqwest::Client, config: &PulseConfig) -> Self {
        Self {
            http_client,
            api_url: config.github_api_url.clone(),
            token: config.github_token.clone(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Public event feed URL for a user
    pub fn events_url(&self, username: &str) -> String {
        format!("{}/users/{}/events/public", self.api_url, username)
    }

    /// Fetch the user's most recent push event.
    ///
    /// `Ok(None)` means the feed was read but holds no push.
    pub async fn latest_push_event(
        &self,
        username: &str,
    ) -> Result<Option<ActivityEvent>, FetchError> {
        let url = self.events_url(username);

        let mut request = self
            .http_client
            .get(&url)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, CLIENT_USER_AGENT);

        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let events: Vec<ActivityEvent> = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        tracing::debug!(
            username = %username,
            events = events.len(),
            "Fetched public events"
        );

        Ok(latest_push(events))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("GitHub returned status {0}")]
    Status(u16),

    #[error("Malformed event feed: {0}")]
    Malformed(String),
}
