//! Per-invocation configuration
//!
//! Values come from a flat key lookup. In production that lookup is the
//! process environment; tests hand in a map.

use std::collections::HashMap;

pub const GITHUB_USERNAME: &str = "GITHUB_USERNAME";
pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const WEBHOOK_URL: &str = "WEBHOOK_URL";
pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const GITHUB_API_URL: &str = "CODEPULSE_GITHUB_API_URL";
pub const TELEGRAM_API_URL: &str = "CODEPULSE_TELEGRAM_API_URL";

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Configuration for a single pulse check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulseConfig {
    /// GitHub user to monitor
    pub username: String,
    /// Optional GitHub token, sent as `Authorization: token ...`
    pub github_token: Option<String>,
    /// Generic webhook sink
    pub webhook_url: Option<String>,
    /// Telegram bot sink, active only when both halves are set
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    /// Base URL of the GitHub REST API
    pub github_api_url: String,
    /// Base URL of the Telegram Bot API
    pub telegram_api_url: String,
}

impl PulseConfig {
    /// Create a config with only the required username set
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            github_token: None,
            webhook_url: None,
            telegram_bot_token: None,
            telegram_chat_id: None,
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
        }
    }

    /// Load configuration from environment variables
    /// GITHUB_USERNAME=octocat
    /// GITHUB_TOKEN=ghp_...
    /// WEBHOOK_URL=https://discord.com/api/webhooks/...
    /// TELEGRAM_BOT_TOKEN=123:abc
    /// TELEGRAM_CHAT_ID=42
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from a map of key/value pairs
    pub fn from_map(values: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| values.get(key).cloned())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let username = get(GITHUB_USERNAME).ok_or(ConfigError::MissingUsername)?;

        Ok(Self {
            username,
            github_token: get(GITHUB_TOKEN),
            webhook_url: get(WEBHOOK_URL),
            telegram_bot_token: get(TELEGRAM_BOT_TOKEN),
            telegram_chat_id: get(TELEGRAM_CHAT_ID),
            github_api_url: get(GITHUB_API_URL)
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            telegram_api_url: get(TELEGRAM_API_URL)
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
        })
    }

    pub fn with_github_token(mut self, token: impl Into<String>) -> Self {
        self.github_token = Some(token.into());
        self
    }

    pub fn with_webhook(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    pub fn with_telegram(mut self, bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        self.telegram_bot_token = Some(bot_token.into());
        self.telegram_chat_id = Some(chat_id.into());
        self
    }

    pub fn with_github_api_url(mut self, url: impl Into<String>) -> Self {
        self.github_api_url = url.into();
        self
    }

    pub fn with_telegram_api_url(mut self, url: impl Into<String>) -> Self {
        self.telegram_api_url = url.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("GITHUB_USERNAME is not set")]
    MissingUsername,
}
