//! Skill Badge Advisor — suggests new skill badges from a user's skills, interests
//! and project history.
//!
//! Flow: validate request → render prompt → provider call → validate output.
//! The result is returned as the model produced it: no re-ranking and no
//! deduplication against the user's existing skills.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use crate::flows::policy::{invoke_provider, CallOptions};
use crate::flows::prompts::{
    render_template, NO_EXISTING_SKILLS, NO_INTERESTS, NO_PROJECT_HISTORY,
    SKILL_SUGGESTION_PROMPT_TEMPLATE,
};
use crate::flows::FlowError;
use crate::llm_client::{OutputSchema, TextGenerator};
use crate::models::skill::{
    SkillBadge, SkillSuggestionRequest, SkillSuggestionResult, UserInterestProfile,
};

pub const MIN_SUGGESTED_BADGES: usize = 3;
pub const MAX_SUGGESTED_BADGES: usize = 5;

const SCHEMA_NAME: &str = "skill_suggestions";

/// Stateless advisor bound to a provider and a call policy. Cheap to clone.
#[derive(Clone)]
pub struct SkillBadgeAdvisor {
    provider: Arc<dyn TextGenerator>,
    options: CallOptions,
}

impl SkillBadgeAdvisor {
    pub fn new(provider: Arc<dyn TextGenerator>, options: CallOptions) -> Self {
        Self { provider, options }
    }

    pub async fn suggest(
        &self,
        request: &SkillSuggestionRequest,
    ) -> Result<SkillSuggestionResult, FlowError> {
        suggest_skill_badges(self.provider.as_ref(), request, &self.options).await
    }
}

/// Runs the skill suggestion flow once.
pub async fn suggest_skill_badges(
    provider: &dyn TextGenerator,
    request: &SkillSuggestionRequest,
    options: &CallOptions,
) -> Result<SkillSuggestionResult, FlowError> {
    let request_id = Uuid::new_v4();

    validate_request(request)?;

    let prompt = build_skill_suggestion_prompt(request);
    debug!(
        "Skill suggestion {request_id}: {} skills, {} history entries, prompt {} chars",
        request.existing_skills.len(),
        request.project_history.len(),
        prompt.len()
    );

    let raw = invoke_provider(provider, &prompt, &skill_suggestion_schema(), options).await?;
    let result = validate_output(raw)?;

    debug!(
        "Skill suggestion {request_id}: {} badges suggested",
        result.suggested_badges.len()
    );
    Ok(result)
}

/// Rejects malformed entries instead of silently dropping them.
pub fn validate_request(request: &SkillSuggestionRequest) -> Result<(), FlowError> {
    for (i, skill) in request.existing_skills.iter().enumerate() {
        if skill.name.trim().is_empty() {
            return Err(FlowError::validation(
                format!("existingSkills[{i}].name"),
                "must not be empty",
            ));
        }
    }

    for (i, entry) in request.project_history.iter().enumerate() {
        if entry.trim().is_empty() {
            return Err(FlowError::validation(
                format!("projectHistory[{i}]"),
                "must not be empty",
            ));
        }
    }

    Ok(())
}

/// Renders the prompt. Deterministic: identical requests render identical prompts.
pub fn build_skill_suggestion_prompt(request: &SkillSuggestionRequest) -> String {
    let existing_skills = render_existing_skills(&request.existing_skills);
    let interests = render_interests(&request.interests);
    let project_history = render_project_history(&request.project_history);

    render_template(
        SKILL_SUGGESTION_PROMPT_TEMPLATE,
        &[
            ("existing_skills", existing_skills.as_str()),
            ("interests", interests.as_str()),
            ("project_history", project_history.as_str()),
        ],
    )
}

fn render_existing_skills(skills: &[SkillBadge]) -> String {
    if skills.is_empty() {
        return NO_EXISTING_SKILLS.to_string();
    }
    skills
        .iter()
        .map(|skill| match skill.level {
            Some(level) => format!("- {} ({level})", skill.name.trim()),
            None => format!("- {}", skill.name.trim()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_interests(interests: &UserInterestProfile) -> String {
    let stated = interests.stated_preferences();
    if stated.is_empty() {
        return NO_INTERESTS.to_string();
    }
    stated
        .iter()
        .map(|(key, value)| format!("- {key}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_project_history(history: &[String]) -> String {
    if history.is_empty() {
        return NO_PROJECT_HISTORY.to_string();
    }
    history
        .iter()
        .map(|entry| format!("- {}", entry.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn skill_suggestion_schema() -> OutputSchema {
    OutputSchema {
        name: SCHEMA_NAME,
        description: "Record the recommended skill badges and the reasoning behind them.",
        schema: json!({
            "type": "object",
            "properties": {
                "suggestedBadges": {
                    "type": "array",
                    "items": {"type": "string", "minLength": 1},
                    "minItems": MIN_SUGGESTED_BADGES,
                    "maxItems": MAX_SUGGESTED_BADGES,
                    "description": "A list of recommended skill badges."
                },
                "reasoning": {
                    "type": "string",
                    "description": "A brief explanation for the suggested badges."
                }
            },
            "required": ["suggestedBadges", "reasoning"]
        }),
    }
}

/// Parses and checks the provider's answer. Never returns a partially valid result.
pub fn validate_output(raw: Value) -> Result<SkillSuggestionResult, FlowError> {
    let result: SkillSuggestionResult = serde_json::from_value(raw)
        .map_err(|e| FlowError::OutputSchema(format!("skill suggestion: {e}")))?;

    let count = result.suggested_badges.len();
    if !(MIN_SUGGESTED_BADGES..=MAX_SUGGESTED_BADGES).contains(&count) {
        return Err(FlowError::OutputSchema(format!(
            "suggestedBadges must hold {MIN_SUGGESTED_BADGES}-{MAX_SUGGESTED_BADGES} badges, got {count}"
        )));
    }

    if let Some(i) = result
        .suggested_badges
        .iter()
        .position(|badge| badge.trim().is_empty())
    {
        return Err(FlowError::OutputSchema(format!(
            "suggestedBadges[{i}] is empty"
        )));
    }

    if result.reasoning.trim().is_empty() {
        return Err(FlowError::OutputSchema("reasoning is empty".to_string()));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::testing::{FixedProvider, ScriptedProvider};
    use crate::llm_client::LlmError;
    use crate::models::skill::SkillLevel;

    fn react_hackathon_request() -> SkillSuggestionRequest {
        SkillSuggestionRequest {
            existing_skills: vec![SkillBadge::named("React")],
            interests: UserInterestProfile {
                hackathons: Some(true),
                ..Default::default()
            },
            project_history: vec![],
        }
    }

    fn badges_answer(badges: &[&str]) -> Value {
        json!({
            "suggestedBadges": badges,
            "reasoning": "These skills open doors to hackathon teams."
        })
    }

    #[test]
    fn test_empty_request_renders_all_three_fallbacks() {
        let prompt = build_skill_suggestion_prompt(&SkillSuggestionRequest::default());

        assert!(prompt.contains("No existing skills provided"));
        assert!(prompt.contains("No specific interests provided"));
        assert!(prompt.contains("No project history provided"));
        assert!(!prompt.lines().any(|line| line.starts_with("- ")));
    }

    #[test]
    fn test_populated_request_renders_lists_instead_of_fallbacks() {
        let request = SkillSuggestionRequest {
            existing_skills: vec![
                SkillBadge {
                    name: "React".to_string(),
                    level: Some(SkillLevel::Advanced),
                },
                SkillBadge::named("Figma"),
            ],
            interests: UserInterestProfile {
                hackathons: Some(true),
                research: Some(false),
                preferred_role: Some("Frontend".to_string()),
                ..Default::default()
            },
            project_history: vec!["Blockchain Campus Vote".to_string()],
        };

        let prompt = build_skill_suggestion_prompt(&request);

        assert!(prompt.contains("- React (Advanced)\n- Figma"));
        assert!(prompt.contains("- hackathons: true\n- preferredRole: Frontend"));
        assert!(!prompt.contains("research: false"));
        assert!(prompt.contains("- Blockchain Campus Vote"));
        assert!(!prompt.contains(NO_EXISTING_SKILLS));
        assert!(!prompt.contains(NO_INTERESTS));
        assert!(!prompt.contains(NO_PROJECT_HISTORY));
    }

    #[test]
    fn test_only_false_flags_count_as_no_interests() {
        let request = SkillSuggestionRequest {
            interests: UserInterestProfile {
                startup: Some(false),
                competitions: Some(false),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(build_skill_suggestion_prompt(&request).contains(NO_INTERESTS));
    }

    #[test]
    fn test_braced_skill_name_is_rendered_verbatim() {
        let request = SkillSuggestionRequest {
            existing_skills: vec![SkillBadge::named("{project_history}")],
            project_history: vec!["Secret Thesis".to_string()],
            ..Default::default()
        };

        let prompt = build_skill_suggestion_prompt(&request);

        assert!(prompt.contains("- {project_history}\n"));
        assert!(!prompt.contains("- - Secret Thesis"));
        assert_eq!(prompt.matches("- Secret Thesis").count(), 1);
    }

    #[test]
    fn test_braced_history_and_interest_text_is_rendered_verbatim() {
        let request = SkillSuggestionRequest {
            existing_skills: vec![SkillBadge::named("React")],
            interests: UserInterestProfile {
                preferred_role: Some("{existing_skills}".to_string()),
                ..Default::default()
            },
            project_history: vec!["{interests} dashboard".to_string()],
        };

        let prompt = build_skill_suggestion_prompt(&request);

        assert!(prompt.contains("- preferredRole: {existing_skills}"));
        assert!(prompt.contains("- {interests} dashboard"));
        assert_eq!(prompt.matches("- React").count(), 1);
    }

    #[test]
    fn test_prompt_asks_for_three_to_five_suggestions() {
        let prompt = build_skill_suggestion_prompt(&react_hackathon_request());
        assert!(prompt.contains("between 3 and 5"));
        assert!(prompt.contains("discoverability"));
    }

    #[test]
    fn test_empty_skill_name_is_rejected_with_field_path() {
        let request = SkillSuggestionRequest {
            existing_skills: vec![SkillBadge::named("Rust"), SkillBadge::named("   ")],
            ..Default::default()
        };
        match validate_request(&request).unwrap_err() {
            FlowError::Validation { field, .. } => assert_eq!(field, "existingSkills[1].name"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_project_history_entry_is_rejected() {
        let request = SkillSuggestionRequest {
            project_history: vec!["".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            validate_request(&request),
            Err(FlowError::Validation { .. })
        ));
    }

    #[test]
    fn test_output_badge_count_bounds() {
        assert!(validate_output(badges_answer(&["Docker", "Git", "UX"])).is_ok());
        assert!(validate_output(badges_answer(&["A", "B", "C", "D", "E"])).is_ok());

        for badges in [
            &[] as &[&str],
            &["Docker", "Git"][..],
            &["A", "B", "C", "D", "E", "F"][..],
        ] {
            assert!(
                matches!(
                    validate_output(badges_answer(badges)),
                    Err(FlowError::OutputSchema(_))
                ),
                "{} badges must be rejected",
                badges.len()
            );
        }
    }

    #[test]
    fn test_output_with_empty_badge_or_reasoning_is_rejected() {
        assert!(validate_output(badges_answer(&["Docker", " ", "UX"])).is_err());
        assert!(validate_output(json!({
            "suggestedBadges": ["Docker", "Git", "UX"],
            "reasoning": ""
        }))
        .is_err());
    }

    #[test]
    fn test_output_with_wrong_shape_is_rejected() {
        assert!(matches!(
            validate_output(json!({"badges": ["Docker"]})),
            Err(FlowError::OutputSchema(_))
        ));
        assert!(matches!(
            validate_output(json!("Docker, Git, UX")),
            Err(FlowError::OutputSchema(_))
        ));
    }

    #[test]
    fn test_duplicates_of_existing_skills_pass_through() {
        let result =
            validate_output(badges_answer(&["React", "React", "TypeScript"])).unwrap();
        assert_eq!(result.suggested_badges, vec!["React", "React", "TypeScript"]);
    }

    #[tokio::test]
    async fn test_react_hackathon_scenario() {
        let provider = ScriptedProvider::answering(badges_answer(&[
            "TypeScript",
            "Node.js",
            "Rapid Prototyping",
            "Pitching",
        ]));

        let result = suggest_skill_badges(
            &provider,
            &react_hackathon_request(),
            &CallOptions::default(),
        )
        .await
        .unwrap();

        assert!((3..=5).contains(&result.suggested_badges.len()));
        assert_ne!(result.suggested_badges, vec!["React".to_string()]);
        assert!(!result.reasoning.is_empty());

        let prompt = provider.last_prompt().unwrap();
        assert!(prompt.contains("- React"));
        assert!(prompt.contains("- hackathons: true"));
        assert!(prompt.contains(NO_PROJECT_HISTORY));
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_provider() {
        let provider = ScriptedProvider::answering(badges_answer(&["A", "B", "C"]));
        let request = SkillSuggestionRequest {
            existing_skills: vec![SkillBadge::named("")],
            ..Default::default()
        };

        let err = suggest_skill_badges(&provider, &request, &CallOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::Validation { .. }));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces_as_provider_error() {
        let provider = ScriptedProvider::new(vec![Err(LlmError::Api {
            status: 503,
            message: "unavailable".to_string(),
        })]);

        let err = suggest_skill_badges(&provider, &react_hackathon_request(), &CallOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::Provider { retryable: true, .. }));
    }

    #[tokio::test]
    async fn test_identical_requests_against_fixed_provider_are_identical() {
        let advisor = SkillBadgeAdvisor::new(
            Arc::new(FixedProvider(badges_answer(&["Docker", "Git", "UX"]))),
            CallOptions::default(),
        );
        let request = react_hackathon_request();

        let first = advisor.suggest(&request).await.unwrap();
        let second = advisor.suggest(&request).await.unwrap();

        assert_eq!(first, second);
    }
}
