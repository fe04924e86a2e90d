use std::fmt;

use serde::{Deserialize, Serialize};

/// Advisory proficiency attached to a skill badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        };
        f.write_str(label)
    }
}

/// One named competency a user claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillBadge {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<SkillLevel>,
}

#[cfg(test)]
impl SkillBadge {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
        }
    }
}

/// Sparse preference flags. `None` means "no preference stated", never "false".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInterestProfile {
    pub hackathons: Option<bool>,
    pub research: Option<bool>,
    pub startup: Option<bool>,
    pub open_source: Option<bool>,
    pub competitions: Option<bool>,
    pub preferred_role: Option<String>,
    pub availability: Option<String>,
}

impl UserInterestProfile {
    /// Returns the preferences that are actually stated, in a fixed order, keyed by
    /// their wire names. False flags and blank strings are skipped.
    pub fn stated_preferences(&self) -> Vec<(&'static str, String)> {
        let flags = [
            ("hackathons", self.hackathons),
            ("research", self.research),
            ("startup", self.startup),
            ("openSource", self.open_source),
            ("competitions", self.competitions),
        ];
        let texts = [
            ("preferredRole", self.preferred_role.as_deref()),
            ("availability", self.availability.as_deref()),
        ];

        flags
            .into_iter()
            .filter(|(_, value)| *value == Some(true))
            .map(|(key, _)| (key, "true".to_string()))
            .chain(
                texts
                    .into_iter()
                    .filter_map(|(key, value)| value.map(|v| (key, v.trim())))
                    .filter(|(_, value)| !value.is_empty())
                    .map(|(key, value)| (key, value.to_string())),
            )
            .collect()
    }
}

/// Input of the skill badge advisor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSuggestionRequest {
    #[serde(default)]
    pub existing_skills: Vec<SkillBadge>,
    #[serde(default)]
    pub interests: UserInterestProfile,
    #[serde(default)]
    pub project_history: Vec<String>,
}

/// Output of the skill badge advisor. Badges are not deduplicated against the
/// user's existing skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSuggestionResult {
    pub suggested_badges: Vec<String>,
    pub reasoning: String,
}
