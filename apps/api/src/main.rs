mod candidates;
mod config;
mod errors;
mod extraction;
mod matching;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::candidates::repository::InMemoryCandidateRepository;
use crate::config::Config;
use crate::extraction::parser::ResumeParser;
use crate::matching::matcher::JobMatcher;
use crate::matching::semantic::{FastEmbedder, TextEmbedder};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Screening API v{}", env!("CARGO_PKG_VERSION"));

    // No entity recognizer ships with the service; names use the line heuristic.
    let parser = Arc::new(ResumeParser::default());
    info!(
        entity_recognizer = parser.has_entity_recognizer(),
        "Resume parser initialized"
    );

    let matcher = Arc::new(JobMatcher::new(load_embedder(&config).await));

    let state = AppState {
        config: config.clone(),
        parser,
        matcher,
        candidates: Arc::new(InMemoryCandidateRepository::new()),
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

/// Loads the embedding model on the blocking pool (first run downloads it).
/// A load failure is logged and leaves the matcher without semantic scoring.
async fn load_embedder(config: &Config) -> Option<Arc<dyn TextEmbedder>> {
    if !config.enable_semantic_matching {
        info!("Semantic matching disabled; similarity scores will be 0.0");
        return None;
    }

    let model_name = config.embedding_model.clone();
    let cache_dir = config.embedding_cache_dir.clone();
    info!(model = %model_name, "Loading embedding model...");

    let loaded = tokio::task::spawn_blocking(move || FastEmbedder::new(&model_name, cache_dir)).await;
    match loaded {
        Ok(Ok(embedder)) => {
            info!(model = embedder.model_name(), "Embedding model loaded");
            let embedder: Arc<dyn TextEmbedder> = Arc::new(embedder);
            Some(embedder)
        }
        Ok(Err(e)) => {
            warn!("Error loading embedding model: {e}");
            None
        }
        Err(e) => {
            warn!("Embedding model loader panicked: {e}");
            None
        }
    }
}
