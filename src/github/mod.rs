//! GitHub public event feed
//!
//! Fetches a user's public activity and picks out the most recent push.

pub mod client;
pub mod model;

pub use client::{FetchError, GitHubClient};
pub use model::{ActivityEvent, EventRepo, PUSH_EVENT};
