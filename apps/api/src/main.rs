mod config;
mod dashboard;
mod errors;
mod flows;
mod learn;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::flows::project_description::ProjectDescriptionGenerator;
use crate::flows::skill_badges::SkillBadgeAdvisor;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("campusconnect_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CampusConnect API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client; the flow-level timeout is the authoritative one
    let call_options = config.call_options();
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        config.llm_model.clone(),
        call_options.timeout + Duration::from_secs(5),
    )?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s, max retries: {})",
        llm.model(),
        config.llm_timeout_secs,
        config.llm_max_retries
    );
    let provider: Arc<dyn TextGenerator> = Arc::new(llm);

    info!(
        "Confidentiality policy: {:?}",
        config.confidentiality_policy
    );

    // Build app state
    let state = AppState {
        skill_advisor: SkillBadgeAdvisor::new(provider.clone(), call_options),
        description_generator: ProjectDescriptionGenerator::new(
            provider,
            call_options,
            config.confidentiality_policy,
        ),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the web client's origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
