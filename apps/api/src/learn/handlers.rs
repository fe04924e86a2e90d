//! Axum route handlers for learning sessions.

use axum::{extract::rejection::JsonRejection, Json};
use chrono::Utc;

use crate::errors::AppError;
use crate::learn::link_gate::{link_status, LinkStatus};
use crate::models::session::LearningSession;

/// POST /api/v1/sessions/link-status
///
/// Evaluates the session's link gate against the server clock.
pub async fn handle_link_status(
    payload: Result<Json<LearningSession>, JsonRejection>,
) -> Result<Json<LinkStatus>, AppError> {
    let Json(session) = payload?;
    if session.meet_link.trim().is_empty() {
        return Err(AppError::Validation("meetLink cannot be empty".to_string()));
    }

    Ok(Json(link_status(&session, Utc::now())))
}
