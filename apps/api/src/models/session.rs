use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled peer-learning session. The meeting link stays private until the
/// session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningSession {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub topic: String,
    pub scheduled_at: DateTime<Utc>,
    pub meet_link: String,
}
