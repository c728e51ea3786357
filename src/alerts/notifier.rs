//! Delivery of alert messages to the configured sinks

use super::config::{SinkKind, SinkSet, TelegramSink, WebhookSink};

/// Sends alert messages, one attempt per sink
pub struct Notifier {
    client: reqwest::Client,
}

/// What happened to one sink
#[derive(Debug)]
pub enum DeliveryOutcome {
    Delivered,
    Skipped(String),
    Failed(NotifierError),
}

#[derive(Debug)]
pub struct DeliveryReport {
    pub sink: SinkKind,
    pub outcome: DeliveryOutcome,
}

impl DeliveryReport {
    pub fn is_delivered(&self) -> bool {
        matches!(self.outcome, DeliveryOutcome::Delivered)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, DeliveryOutcome::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, DeliveryOutcome::Failed(_))
    }
}

impl Notifier {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Attempt every sink in turn. A failed sink never stops the next one.
    pub async fn notify_all(&self, sinks: &SinkSet, message: &str) -> Vec<DeliveryReport> {
        let webhook = self.deliver_webhook(&sinks.webhook, message).await;
        let telegram = self.deliver_telegram(&sinks.telegram, message).await;
        vec![webhook, telegram]
    }

    pub async fn deliver_webhook(&self, sink: &WebhookSink, message: &str) -> DeliveryReport {
        let outcome = match &sink.url {
            None => {
                tracing::info!("No webhook URL provided, skipping webhook notification");
                DeliveryOutcome::Skipped("webhook URL not configured".to_string())
            }
            Some(url) => Self::settle(SinkKind::Webhook, self.send_webhook(url, message).await),
        };

        DeliveryReport {
            sink: SinkKind::Webhook,
            outcome,
        }
    }

    pub async fn deliver_telegram(&self, sink: &TelegramSink, message: &str) -> DeliveryReport {
        let outcome = match (sink.send_message_url(), &sink.chat_id) {
            (Some(url), Some(chat_id)) => Self::settle(
                SinkKind::Telegram,
                self.send_telegram(&url, chat_id, message).await,
            ),
            _ => {
                tracing::info!("No Telegram credentials provided, skipping Telegram notification");
                DeliveryOutcome::Skipped("telegram bot token or chat id not configured".to_string())
            }
        };

        DeliveryReport {
            sink: SinkKind::Telegram,
            outcome,
        }
    }

    fn settle(sink: SinkKind, result: Result<(), NotifierError>) -> DeliveryOutcome {
        match result {
            Ok(()) => {
                tracing::info!(sink = %sink, "Notification sent");
                DeliveryOutcome::Delivered
            }
            Err(e) => {
                tracing::error!(sink = %sink, error = %e, "Failed to send notification");
                DeliveryOutcome::Failed(e)
            }
        }
    }

    /// Send webhook notification
    async fn send_webhook(&self, url: &str, message: &str) -> Result<(), NotifierError> {
        let payload = serde_json::json!({ "content": message });

        // Webhook URLs usually carry a secret token, so it is stripped from errors
        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                NotifierError::Webhook(format!("Failed to send webhook: {}", e.without_url()))
            })?;

        if !response.status().is_success() {
            return Err(NotifierError::Webhook(format!(
                "Webhook returned status {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Send Telegram `sendMessage` request
    async fn send_telegram(
        &self,
        url: &str,
        chat_id: &str,
        message: &str,
    ) -> Result<(), NotifierError> {
        let payload = serde_json::json!({
            "chat_id": chat_id,
            "text": message,
        });

        // The URL embeds the bot token, so errors are stripped of it before logging
        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                NotifierError::Telegram(format!("Failed to reach Telegram: {}", e.without_url()))
            })?;

        if !response.status().is_success() {
            return Err(NotifierError::Telegram(format!(
                "Telegram returned status {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// Notifier errors
#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("Webhook error: {0}")]
    Webhook(String),

    #[error("Telegram error: {0}")]
    Telegram(String),
}
