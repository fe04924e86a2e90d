//! Project Description Generator — writes a summary and a detailed description for
//! a new project post.
//!
//! Flow: validate request → render prompt → provider call → validate output →
//! enforce confidentiality notice.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use crate::flows::confidentiality::{enforce_notice, ConfidentialityPolicy, CONFIDENTIALITY_NOTICE};
use crate::flows::policy::{invoke_provider, CallOptions};
use crate::flows::prompts::{
    render_template, NO_REQUIRED_SKILLS, PROJECT_DESCRIPTION_PROMPT_TEMPLATE,
};
use crate::flows::FlowError;
use crate::llm_client::{OutputSchema, TextGenerator};
use crate::models::project::{ProjectDescriptionRequest, ProjectDescriptionResult};

const SCHEMA_NAME: &str = "project_description";

/// Stateless generator bound to a provider, a call policy and a confidentiality
/// policy. Cheap to clone.
#[derive(Clone)]
pub struct ProjectDescriptionGenerator {
    provider: Arc<dyn TextGenerator>,
    options: CallOptions,
    policy: ConfidentialityPolicy,
}

impl ProjectDescriptionGenerator {
    pub fn new(
        provider: Arc<dyn TextGenerator>,
        options: CallOptions,
        policy: ConfidentialityPolicy,
    ) -> Self {
        Self {
            provider,
            options,
            policy,
        }
    }

    pub async fn generate(
        &self,
        request: &ProjectDescriptionRequest,
    ) -> Result<ProjectDescriptionResult, FlowError> {
        generate_project_description(self.provider.as_ref(), request, &self.options, self.policy)
            .await
    }
}

/// Runs the project description flow once.
pub async fn generate_project_description(
    provider: &dyn TextGenerator,
    request: &ProjectDescriptionRequest,
    options: &CallOptions,
    policy: ConfidentialityPolicy,
) -> Result<ProjectDescriptionResult, FlowError> {
    let request_id = Uuid::new_v4();

    validate_request(request)?;

    let prompt = build_project_description_prompt(request);
    debug!(
        "Project description {request_id}: type={}, {} required skills",
        request.project_type,
        request.required_skills.len()
    );

    let raw = invoke_provider(provider, &prompt, &project_description_schema(), options).await?;
    let result = enforce_notice(validate_output(raw)?, policy)?;

    debug!(
        "Project description {request_id}: {} chars generated",
        result.detailed_description.len()
    );
    Ok(result)
}

/// `projectType` is already guaranteed by deserialization; titles and skill
/// entries are checked here. An empty skill list is valid.
pub fn validate_request(request: &ProjectDescriptionRequest) -> Result<(), FlowError> {
    if request.project_title.trim().is_empty() {
        return Err(FlowError::validation("projectTitle", "must not be empty"));
    }

    if let Some(i) = request
        .required_skills
        .iter()
        .position(|skill| skill.trim().is_empty())
    {
        return Err(FlowError::validation(
            format!("requiredSkills[{i}]"),
            "must not be empty",
        ));
    }

    Ok(())
}

pub fn build_project_description_prompt(request: &ProjectDescriptionRequest) -> String {
    let skills = if request.required_skills.is_empty() {
        NO_REQUIRED_SKILLS.to_string()
    } else {
        request
            .required_skills
            .iter()
            .map(|skill| skill.trim())
            .collect::<Vec<_>>()
            .join(", ")
    };

    render_template(
        PROJECT_DESCRIPTION_PROMPT_TEMPLATE,
        &[
            ("project_title", request.project_title.trim()),
            ("project_type", request.project_type.as_str()),
            ("required_skills", skills.as_str()),
            ("confidentiality_notice", CONFIDENTIALITY_NOTICE),
        ],
    )
}

pub fn project_description_schema() -> OutputSchema {
    OutputSchema {
        name: SCHEMA_NAME,
        description: "Record the generated project summary and detailed description.",
        schema: json!({
            "type": "object",
            "properties": {
                "summary": {
                    "type": "string",
                    "description": "A short, compelling summary of the project."
                },
                "detailedDescription": {
                    "type": "string",
                    "description": "A detailed description of the project, ending with a confidentiality notice section."
                }
            },
            "required": ["summary", "detailedDescription"]
        }),
    }
}

pub fn validate_output(raw: Value) -> Result<ProjectDescriptionResult, FlowError> {
    let result: ProjectDescriptionResult = serde_json::from_value(raw)
        .map_err(|e| FlowError::OutputSchema(format!("project description: {e}")))?;

    if result.summary.trim().is_empty() {
        return Err(FlowError::OutputSchema("summary is empty".to_string()));
    }
    if result.detailed_description.trim().is_empty() {
        return Err(FlowError::OutputSchema(
            "detailedDescription is empty".to_string(),
        ));
    }

    Ok(result)
}
