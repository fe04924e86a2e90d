// All LLM prompt templates for the generation flows.
// Templates are filled with `render_template`; every placeholder is listed above its template.

/// Fallback lines rendered when a section of the skill request is empty.
pub const NO_EXISTING_SKILLS: &str = "No existing skills provided.";
pub const NO_INTERESTS: &str = "No specific interests provided.";
pub const NO_PROJECT_HISTORY: &str = "No project history provided.";

/// Rendered in place of the skill list when a project requires no specific skills.
pub const NO_REQUIRED_SKILLS: &str = "No specific skills required";

/// Skill badge suggestion prompt template.
/// Replace: {existing_skills}, {interests}, {project_history}
pub const SKILL_SUGGESTION_PROMPT_TEMPLATE: &str = r#"You are an expert career and collaboration advisor for a campus platform called CampusConnect.
Your task is to recommend new skill badges for a user to add to their profile, based on their existing information, interests, project history, and current community trends.
The goal is to help the user discover relevant collaboration opportunities and better represent their capabilities.

Consider the following user data:

Existing Skills (badges):
{existing_skills}

Interests:
{interests}

Project History:
{project_history}

Based on this information and general trends in campus collaboration, suggest between 3 and 5 new, relevant skill badges that would enhance the user's profile.

HARD RULES:
1. Return at least 3 and at most 5 badges in `suggestedBadges`
2. Do NOT suggest a badge the user already holds, or a near-duplicate of one
3. Each badge is a short label (e.g. "Docker", "Public Speaking"), never a sentence
4. For each suggestion, weigh its potential to unlock new collaboration opportunities (hackathons, research, startups) and to improve the user's discoverability
5. Put a brief, single-paragraph explanation of your choices in `reasoning`"#;

/// Project description prompt template.
/// Replace: {confidentiality_notice}, {project_type}, {required_skills}, {project_title}
pub const PROJECT_DESCRIPTION_PROMPT_TEMPLATE: &str = r#"You are an AI assistant specialized in creating compelling project descriptions for collaboration platforms.
Your goal is to help project creators generate a project summary and a detailed description that attracts suitable collaborators.

Use the following information to generate the output:

Project Title: {project_title}
Project Type: {project_type}
Required Skills: {required_skills}

Generate a short, compelling one-sentence `summary` and a `detailedDescription` for the project.
The detailed description MUST end with a confidentiality notice section, separated from the body by a line containing only "---".

Example Confidentiality Notice (follow its structure, adapt the wording to the project):
---
{confidentiality_notice}"#;

/// Fills `{name}` placeholders in one left-to-right pass. Substituted text is never
/// re-scanned, so values containing `{...}` are inserted verbatim. Unknown
/// placeholders are left as they are.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substitution = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });

        match substitution {
            Some((value, close)) => {
                rendered.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                rendered.push('{');
                rest = after;
            }
        }
    }

    rendered.push_str(rest);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template_fills_every_placeholder() {
        let rendered = render_template("{a} and {b}, again {a}", &[("a", "x"), ("b", "y")]);
        assert_eq!(rendered, "x and y, again x");
    }

    #[test]
    fn test_render_template_does_not_expand_substituted_values() {
        let rendered = render_template(
            "first: {first}\nsecond: {second}",
            &[("first", "{second}"), ("second", "real")],
        );
        assert_eq!(rendered, "first: {second}\nsecond: real");
    }

    #[test]
    fn test_render_template_keeps_unknown_and_unclosed_braces() {
        assert_eq!(render_template("{unknown} {a", &[("a", "x")]), "{unknown} {a");
        assert_eq!(render_template("{{a}}", &[("a", "x")]), "{x}");
    }
}
