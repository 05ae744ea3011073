use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ai_hub::config::Config;
use ai_hub::routes;
use ai_hub::services::inference::InferenceClient;
use ai_hub::services::sync::GitSyncer;
use ai_hub::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ai_hub=info,tower_http=info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "❌ Error loading API config");
            std::process::exit(1);
        }
    };

    let inference = InferenceClient::new(
        config.inference_url.clone(),
        config.credential.clone(),
        config.request_timeout,
    )
    .context("Failed to build HTTP client")?;
    info!(
        endpoint = %inference.endpoint(),
        credential = inference.has_credential(),
        "Inference client ready"
    );
    let syncer = GitSyncer::new(
        config.sync.repo_dir.clone(),
        config.sync.remote.clone(),
        config.sync.branch.clone(),
    );
    let state = Arc::new(AppState::new(inference, Arc::new(syncer)));

    let app = routes::create_router(&config.static_dir).with_state(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🚀 Server running on port {}", config.port);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
