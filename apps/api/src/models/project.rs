use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of project kinds. Only ever rendered into prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectType {
    Hackathon,
    Research,
    Startup,
    Competition,
    #[serde(rename = "General Collaboration")]
    GeneralCollaboration,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Hackathon => "Hackathon",
            ProjectType::Research => "Research",
            ProjectType::Startup => "Startup",
            ProjectType::Competition => "Competition",
            ProjectType::GeneralCollaboration => "General Collaboration",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input of the project description generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptionRequest {
    pub project_title: String,
    pub project_type: ProjectType,
    #[serde(default)]
    pub required_skills: Vec<String>,
}

/// Output of the project description generator. `detailed_description` always
/// carries a confidentiality notice once it leaves the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptionResult {
    pub summary: String,
    pub detailed_description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectCategory {
    Technical,
    #[serde(rename = "Non-Technical")]
    NonTechnical,
}

/// A project as shown on the dashboard feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPost {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: ProjectCategory,
    #[serde(alias = "type")]
    pub project_type: ProjectType,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub members: u32,
    #[serde(default)]
    pub max_members: u32,
}
