//! Alert delivery
//!
//! Sends the flatline alert to a generic webhook and a Telegram bot. Each
//! sink gets one independent attempt.

pub mod config;
pub mod notifier;

pub use config::{SinkKind, SinkSet, TelegramSink, WebhookSink};
pub use notifier::{DeliveryOutcome, DeliveryReport, Notifier, NotifierError};
