// src/routes/mod.rs
pub mod relay;

use std::path::Path;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use relay::{ask_ai_handler, business_report_handler, home_handler, sync_github_handler};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Builds the service router. Unmatched paths fall through to files under `static_dir`.
pub fn create_router(static_dir: impl AsRef<Path>) -> Router<SharedState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/business-report", get(business_report_handler))
        .route("/ask-ai", post(ask_ai_handler))
        .route("/sync-github", get(sync_github_handler))
        .route("/health", get(|| async { "OK" }))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}
