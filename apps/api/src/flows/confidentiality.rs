//! Confidentiality notice enforcement for generated project descriptions.
//!
//! The prompt asks the model for a notice, but the model may still omit it. What
//! happens then is decided by `ConfidentialityPolicy`.

use std::str::FromStr;

use tracing::warn;

use crate::flows::FlowError;
use crate::models::project::ProjectDescriptionResult;

/// Canonical notice. Also used as the exemplar in the description prompt.
pub const CONFIDENTIALITY_NOTICE: &str = "Confidentiality Notice: This project involves \
    sensitive information. Further details will be disclosed to approved team members under an NDA.";

const NOTICE_MARKER: &str = "confidentiality";
const NOTICE_DELIMITER: &str = "---";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfidentialityPolicy {
    /// Append the canonical notice when it is missing.
    #[default]
    Append,
    /// Fail with `FlowError::ContractViolation` when it is missing.
    Reject,
}

impl FromStr for ConfidentialityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "append" => Ok(ConfidentialityPolicy::Append),
            "reject" => Ok(ConfidentialityPolicy::Reject),
            other => Err(format!(
                "unknown confidentiality policy '{other}' (expected 'append' or 'reject')"
            )),
        }
    }
}

/// True when `text` mentions confidentiality anywhere, case-insensitively.
pub fn has_notice(text: &str) -> bool {
    text.to_lowercase().contains(NOTICE_MARKER)
}

/// Appends the canonical notice as a delimited closing section. No-op when a
/// notice is already present.
pub fn append_notice(text: &str) -> String {
    if has_notice(text) {
        return text.to_string();
    }
    format!(
        "{}\n\n{NOTICE_DELIMITER}\n{CONFIDENTIALITY_NOTICE}",
        text.trim_end()
    )
}

/// Makes sure the description carries a notice, according to `policy`.
pub fn enforce_notice(
    result: ProjectDescriptionResult,
    policy: ConfidentialityPolicy,
) -> Result<ProjectDescriptionResult, FlowError> {
    if has_notice(&result.detailed_description) {
        return Ok(result);
    }

    match policy {
        ConfidentialityPolicy::Append => {
            warn!("Generated description lacked a confidentiality notice, appending canonical notice");
            Ok(ProjectDescriptionResult {
                detailed_description: append_notice(&result.detailed_description),
                ..result
            })
        }
        ConfidentialityPolicy::Reject => Err(FlowError::ContractViolation(
            "detailedDescription is missing the confidentiality notice section".to_string(),
        )),
    }
}
