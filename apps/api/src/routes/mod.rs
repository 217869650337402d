pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Match API
        .route("/api/v1/match", post(handlers::handle_match))
        .route("/api/v1/match/files", post(handlers::handle_match_files))
        .route("/api/v1/match/analyze", post(handlers::handle_analyze))
        .with_state(state)
}
