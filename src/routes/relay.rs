use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{debug, error, info};

use crate::{
    error::AppError,
    message::{AskRequest, AskResponse, ReportResponse, SyncResponse},
    services::inference::BUSINESS_REPORT_PROMPT,
    state::SharedState,
};

pub const HOME_TEXT: &str = "✅ AI Hub is running!";
pub const MESSAGE_REQUIRED: &str = "Message is required.";
pub const SYNC_ACK: &str = "GitHub content synced successfully!";

pub async fn home_handler() -> &'static str {
    HOME_TEXT
}

pub async fn business_report_handler(State(state): State<SharedState>) -> Json<ReportResponse> {
    let report = state.inference.relay(BUSINESS_REPORT_PROMPT).await.into_text();
    Json(ReportResponse { report })
}

pub async fn ask_ai_handler(
    State(state): State<SharedState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, AppError> {
    // Unparseable bodies are treated the same as a missing message.
    let payload = payload
        .map(|Json(payload)| payload)
        .unwrap_or_else(|rejection| {
            debug!(%rejection, "Rejected /ask-ai body");
            AskRequest::default()
        });

    let Some(message) = payload.into_message() else {
        return Err(AppError::BadRequest(MESSAGE_REQUIRED.to_string()));
    };

    let response = state.inference.relay(&message).await.into_text();
    Ok(Json(AskResponse { response }))
}

// The pull runs on its own task so a disconnecting caller cannot abort it
// mid-merge. Its result never reaches the caller; failures are only logged.
pub async fn sync_github_handler(State(state): State<SharedState>) -> Json<SyncResponse> {
    let syncer = state.syncer.clone();
    match tokio::spawn(async move { syncer.pull().await }).await {
        Ok(Ok(())) => info!("GitHub content synced"),
        Ok(Err(e)) => error!(error = %e, "❌ Git pull failed"),
        Err(e) => error!(error = %e, "❌ Git pull task did not complete"),
    }
    Json(SyncResponse {
        message: SYNC_ACK.to_string(),
    })
}
