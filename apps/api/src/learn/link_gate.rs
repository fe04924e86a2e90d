//! Session link gate — decides whether a session's meeting link may be shown.
//!
//! The link is released at or after `scheduled_at`. Before that the caller gets a
//! countdown label instead of the link.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::session::LearningSession;

pub const LIVE_LABEL: &str = "Session is Live!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStatus {
    pub released: bool,
    pub label: String,
    /// Present only once released.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meet_link: Option<String>,
}

pub fn is_released(scheduled_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= scheduled_at
}

pub fn link_status(session: &LearningSession, now: DateTime<Utc>) -> LinkStatus {
    if is_released(session.scheduled_at, now) {
        LinkStatus {
            released: true,
            label: LIVE_LABEL.to_string(),
            meet_link: Some(session.meet_link.clone()),
        }
    } else {
        LinkStatus {
            released: false,
            label: countdown_label(session.scheduled_at - now),
            meet_link: None,
        }
    }
}

/// "Available in 2h 5m" with at least one full hour left, "Available in 42m"
/// otherwise. Minutes are floored.
pub fn countdown_label(remaining: Duration) -> String {
    let minutes = remaining.num_minutes().max(0);
    let hours = minutes / 60;
    if hours > 0 {
        format!("Available in {hours}h {}m", minutes % 60)
    } else {
        format!("Available in {minutes}m")
    }
}
