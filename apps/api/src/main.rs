mod config;
mod document;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod resume;
mod routes;
mod state;
mod store;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::{ResumePipeline, StructuredExtractor};
use crate::llm_client::OpenAiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::InMemoryRecordStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portlink API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the generation client
    let generator = OpenAiClient::new(&config).context("Failed to build generation client")?;
    info!(
        "Generation client initialized (model: {}, timeout: {}s)",
        generator.model(),
        config.generation_timeout_secs
    );

    let pipeline = ResumePipeline::new(StructuredExtractor::new(Arc::new(generator)))
        .with_timeout(Duration::from_secs(config.pipeline_timeout_secs));

    // Records live in memory; a durable RecordStore can replace this without touching handlers.
    let store = Arc::new(InMemoryRecordStore::new());
    info!("In-memory record store initialized");

    // Build app state
    let state = AppState {
        pipeline,
        store,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
