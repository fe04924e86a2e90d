//! Axum route handlers for the generation flows.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::errors::AppError;
use crate::models::project::{ProjectDescriptionRequest, ProjectDescriptionResult};
use crate::models::skill::{SkillSuggestionRequest, SkillSuggestionResult};
use crate::state::AppState;

/// POST /api/v1/skills/suggest
///
/// Suggests 3–5 new skill badges for a profile.
pub async fn handle_suggest_skills(
    State(state): State<AppState>,
    payload: Result<Json<SkillSuggestionRequest>, JsonRejection>,
) -> Result<Json<SkillSuggestionResult>, AppError> {
    let Json(request) = payload?;
    let result = state.skill_advisor.suggest(&request).await?;
    Ok(Json(result))
}

/// POST /api/v1/projects/describe
///
/// Generates a summary and a detailed description ending in a confidentiality notice.
pub async fn handle_describe_project(
    State(state): State<AppState>,
    payload: Result<Json<ProjectDescriptionRequest>, JsonRejection>,
) -> Result<Json<ProjectDescriptionResult>, AppError> {
    let Json(request) = payload?;
    let result = state.description_generator.generate(&request).await?;
    Ok(Json(result))
}
