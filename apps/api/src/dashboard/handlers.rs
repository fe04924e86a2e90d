//! Axum route handlers for the dashboard feed.

use axum::{extract::rejection::JsonRejection, Json};
use serde::{Deserialize, Serialize};

use crate::dashboard::feed::{filter_projects, FeedQuery};
use crate::errors::AppError;
use crate::models::project::ProjectPost;

#[derive(Debug, Deserialize)]
pub struct FeedRequest {
    pub projects: Vec<ProjectPost>,
    #[serde(default)]
    pub query: FeedQuery,
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub projects: Vec<ProjectPost>,
    pub total: usize,
}

/// POST /api/v1/projects/feed
///
/// Applies the dashboard filters to the supplied project list.
pub async fn handle_filter_feed(
    payload: Result<Json<FeedRequest>, JsonRejection>,
) -> Result<Json<FeedResponse>, AppError> {
    let Json(request) = payload?;
    let projects = filter_projects(&request.projects, &request.query);
    Ok(Json(FeedResponse {
        total: projects.len(),
        projects,
    }))
}
