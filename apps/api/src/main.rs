mod catalog;
mod config;
mod document;
mod errors;
mod extraction;
mod matching;
mod routes;
mod similarity;
mod state;
mod text;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::SkillsCatalog;
use crate::config::Config;
use crate::document::ReaderChain;
use crate::routes::build_router;
use crate::similarity::classifier::ClassifierClient;
use crate::similarity::{EmbeddingServiceClient, MatchClassifier};
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

    info!("Starting CV Match API v{}", env!("CARGO_PKG_VERSION"));

    // Load the skills catalog; fall back to the built-in minimal catalog so
    // the service stays operational in degraded mode.
    let catalog = match SkillsCatalog::load(&config.skills_catalog_path) {
        Ok(catalog) => {
            info!(
                "Skills catalog loaded from '{}' ({} industries, {} skills)",
                config.skills_catalog_path,
                catalog.industries().len(),
                catalog.all_skills().len()
            );
            catalog
        }
        Err(e) => {
            warn!("Skills catalog unavailable ({e}); using fallback catalog");
            SkillsCatalog::fallback()
        }
    };

    // Initialize the embedding similarity client
    let similarity = EmbeddingServiceClient::new(config.embedding_service_url.clone());
    info!(
        "Embedding service client initialized ({})",
        config.embedding_service_url
    );

    // Optional match classifier
    let classifier: Option<Arc<dyn MatchClassifier>> = match &config.classifier_url {
        Some(url) => {
            info!("Match classifier enabled ({url})");
            Some(Arc::new(ClassifierClient::new(url.clone())))
        }
        None => {
            info!("Match classifier not configured; match_score will be omitted");
            None
        }
    };

    // Build app state
    let state = AppState {
        catalog: Arc::new(catalog),
        similarity: Arc::new(similarity),
        classifier,
        readers: Arc::new(ReaderChain::default()),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
