pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::dashboard::handlers::handle_filter_feed;
use crate::flows::handlers::{handle_describe_project, handle_suggest_skills};
use crate::learn::handlers::handle_link_status;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation flows
        .route("/api/v1/skills/suggest", post(handle_suggest_skills))
        .route("/api/v1/projects/describe", post(handle_describe_project))
        // Dashboard
        .route("/api/v1/projects/feed", post(handle_filter_feed))
        // Learning sessions
        .route("/api/v1/sessions/link-status", post(handle_link_status))
        .with_state(state)
}
