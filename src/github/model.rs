use serde::Deserialize;

/// Discriminator of a code push in the event feed
pub const PUSH_EVENT: &str = "PushEvent";

/// One entry of `GET /users/{user}/events/public`.
///
/// Only the fields the pulse check reads are kept; the rest of the payload
/// is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActivityEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    /// UTC timestamp, `YYYY-MM-DDTHH:MM:SSZ`
    pub created_at: String,
    #[serde(default)]
    pub repo: Option<EventRepo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventRepo {
    pub name: String,
}

impl ActivityEvent {
    pub fn new(kind: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id: None,
            kind: kind.into(),
            created_at: created_at.into(),
            repo: None,
        }
    }

    pub fn push(created_at: impl Into<String>) -> Self {
        Self::new(PUSH_EVENT, created_at)
    }

    pub fn is_push(&self) -> bool {
        self.kind == PUSH_EVENT
    }

    pub fn repo_name(&self) -> Option<&str> {
        self.repo.as_ref().map(|r| r.name.as_str())
    }
}

/// Return the first push event of a most-recent-first feed
pub fn latest_push(events: Vec<ActivityEvent>) -> Option<ActivityEvent> {
    events.into_iter().find(ActivityEvent::is_push)
}
