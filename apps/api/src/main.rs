mod config;
mod db;
mod errors;
mod interview;
mod llm_client;
mod models;
mod routes;
mod state;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, GenerationProvider};
use crate::db::{create_pool, run_migrations};
use crate::interview::store::PgInterviewStore;
use crate::llm_client::{
    build_http_client, AnthropicBackend, BackoffPolicy, GenerationClient, HuggingFaceBackend,
    TextGenerator,
};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview Prep API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;
    let store = Arc::new(PgInterviewStore::new(db));

    // Initialize generation client (one HTTP client, injected into the backend)
    let http = build_http_client()?;
    let backend: Arc<dyn TextGenerator> = match config.provider {
        GenerationProvider::HuggingFace => Arc::new(HuggingFaceBackend::new(
            http,
            config.generation_url.clone(),
            config.generation_api_key.clone(),
        )),
        GenerationProvider::Anthropic => Arc::new(AnthropicBackend::new(
            http,
            config.generation_url.clone(),
            config.generation_api_key.clone(),
        )),
    };
    let policy = BackoffPolicy {
        base_delay: config.base_delay,
        max_attempts: config.max_attempts,
    };
    let llm = GenerationClient::new(backend, policy);
    info!(
        "Generation client initialized (backend: {}, base delay: {}ms, max attempts: {})",
        llm.backend_name(),
        llm.policy().base_delay.as_millis(),
        llm.policy().max_attempts
    );
    info!("Blank lines in generated output: {:?}", config.blank_lines);

    // Build app state
    let state = AppState {
        store,
        llm,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
