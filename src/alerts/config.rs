//! Notification sink definitions

use crate::config::PulseConfig;

/// Which sink a delivery was addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Webhook,
    Telegram,
}

impl std::fmt::Display for SinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkKind::Webhook => write!(f, "webhook"),
            SinkKind::Telegram => write!(f, "telegram"),
        }
    }
}

/// Generic webhook, receives `{"content": message}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSink {
    pub url: Option<String>,
}

/// Telegram bot, receives `{"chat_id": ..., "text": message}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramSink {
    pub api_url: String,
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

impl TelegramSink {
    /// `sendMessage` endpoint, or `None` unless both credentials are present
    pub fn send_message_url(&self) -> Option<String> {
        match (&self.bot_token, &self.chat_id) {
            (Some(token), Some(_)) => Some(format!("{}/bot{}/sendMessage", self.api_url, token)),
            _ => None,
        }
    }
}

/// Both sinks as configured for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkSet {
    pub webhook: WebhookSink,
    pub telegram: TelegramSink,
}

impl SinkSet {
    pub fn from_config(config: &PulseConfig) -> Self {
        Self {
            webhook: WebhookSink {
                url: config.webhook_url.clone(),
            },
            telegram: TelegramSink {
                api_url: config.telegram_api_url.clone(),
                bot_token: config.telegram_bot_token.clone(),
                chat_id: config.telegram_chat_id.clone(),
            },
        }
    }
}
