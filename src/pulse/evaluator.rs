//! Healthy / flatlined decision

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::github::ActivityEvent;

/// More hours than this without a push means the pulse is flat
pub const FLATLINE_THRESHOLD_HOURS: f64 = 24.0;

/// Timestamp format used by the GitHub event feed
pub const EVENT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Result of evaluating the most recent push
#[derive(Debug, Clone, PartialEq)]
pub enum PulseStatus {
    Healthy {
        hours_since: f64,
        last_push: DateTime<Utc>,
    },
    Flatlined {
        /// `None` when no push event was found at all
        last_push: Option<LastPush>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LastPush {
    pub hours_since: f64,
    pub at: DateTime<Utc>,
}

impl PulseStatus {
    pub fn is_flatlined(&self) -> bool {
        matches!(self, PulseStatus::Flatlined { .. })
    }

    /// Hours since the last push, if one was found
    pub fn hours_since(&self) -> Option<f64> {
        match self {
            PulseStatus::Healthy { hours_since, .. } => Some(*hours_since),
            PulseStatus::Flatlined { last_push } => last_push.as_ref().map(|p| p.hours_since),
        }
    }

    /// Time of the last push, if one was found
    pub fn last_push_at(&self) -> Option<DateTime<Utc>> {
        match self {
            PulseStatus::Healthy { last_push, .. } => Some(*last_push),
            PulseStatus::Flatlined { last_push } => last_push.as_ref().map(|p| p.at),
        }
    }
}

/// Parse a feed timestamp as UTC
pub fn parse_event_timestamp(raw: &str) -> Result<DateTime<Utc>, PulseError> {
    NaiveDateTime::parse_from_str(raw, EVENT_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| PulseError::InvalidTimestamp {
            raw: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Fractional hours between two instants
pub fn hours_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier).num_milliseconds() as f64 / 3_600_000.0
}

/// Classify the pulse given the latest push event (if any) and the current time
pub fn evaluate(
    event: Option<&ActivityEvent>,
    now: DateTime<Utc>,
) -> Result<PulseStatus, PulseError> {
    let Some(event) = event else {
        return Ok(PulseStatus::Flatlined { last_push: None });
    };

    let at = parse_event_timestamp(&event.created_at)?;
    let hours_since = hours_between(at, now);

    if hours_since > FLATLINE_THRESHOLD_HOURS {
        Ok(PulseStatus::Flatlined {
            last_push: Some(LastPush { hours_since, at }),
        })
    } else {
        Ok(PulseStatus::Healthy {
            hours_since,
            last_push: at,
        })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PulseError {
    #[error("Invalid event timestamp {raw:?}: {reason}")]
    InvalidTimestamp { raw: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(raw: &str) -> DateTime<Utc> {
        parse_event_timestamp(raw).unwrap()
    }

    #[test]
    fn test_no_event_is_flatlined() {
        let status = evaluate(None, ts("2024-01-02T00:00:00Z")).unwrap();
        assert_eq!(status, PulseStatus::Flatlined { last_push: None });
        assert!(status.hours_since().is_none());
    }

    #[test]
    fn test_exactly_24_hours_is_healthy() {
        let event = ActivityEvent::push("2024-01-01T00:00:00Z");
        let status = evaluate(Some(&event), ts("2024-01-02T00:00:00Z")).unwrap();

        assert!(!status.is_flatlined());
        assert_eq!(status.hours_since(), Some(24.0));
    }

    #[test]
    fn test_just_over_24_hours_is_flatlined() {
        let event = ActivityEvent::push("2023-12-31T23:59:00Z");
        let status = evaluate(Some(&event), ts("2024-01-02T00:00:00Z")).unwrap();

        assert!(status.is_flatlined());
        let hours = status.hours_since().unwrap();
        assert!((hours - 24.0167).abs() < 0.001);
        assert_eq!(status.last_push_at(), Some(ts("2023-12-31T23:59:00Z")));
    }

    #[test]
    fn test_recent_push_is_healthy() {
        let event = ActivityEvent::push("2024-01-01T22:30:00Z");
        let status = evaluate(Some(&event), ts("2024-01-02T00:00:00Z")).unwrap();

        assert!(matches!(status, PulseStatus::Healthy { .. }));
        assert_eq!(status.hours_since(), Some(1.5));
    }

    #[test]
    fn test_threshold_sweep() {
        let now = ts("2024-01-10T00:00:00Z");
        for minutes_ago in [0i64, 60, 23 * 60, 24 * 60, 24 * 60 + 1, 48 * 60] {
            let at = now - chrono::Duration::minutes(minutes_ago);
            let event = ActivityEvent::push(at.format(EVENT_TIMESTAMP_FORMAT).to_string());
            let status = evaluate(Some(&event), now).unwrap();
            assert_eq!(
                status.is_flatlined(),
                minutes_ago > 24 * 60,
                "minutes_ago = {}",
                minutes_ago
            );
        }
    }

    #[test]
    fn test_timestamp_is_utc() {
        let at = ts("2024-06-01T12:34:56Z");
        assert_eq!(at.to_rfc3339(), "2024-06-01T12:34:56+00:00");
    }

    #[test]
    fn test_rejects_other_timestamp_formats() {
        for raw in ["2024-01-01T00:00:00+02:00", "2024-01-01 00:00:00", "yesterday"] {
            let event = ActivityEvent::push(raw);
            let err = evaluate(Some(&event), Utc::now()).unwrap_err();
            assert!(matches!(err, PulseError::InvalidTimestamp { .. }), "{}", raw);
        }
    }
}
