use crate::config::Config;
use crate::flows::project_description::ProjectDescriptionGenerator;
use crate::flows::skill_badges::SkillBadgeAdvisor;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Both flows share one provider behind their `Arc<dyn TextGenerator>`.
#[derive(Clone)]
pub struct AppState {
    pub skill_advisor: SkillBadgeAdvisor,
    pub description_generator: ProjectDescriptionGenerator,
    pub config: Config,
}
