// src/state.rs
use std::sync::Arc;

use crate::services::inference::InferenceClient;
use crate::services::sync::Syncer;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub inference: InferenceClient,
    pub syncer: Arc<dyn Syncer>,
}

impl AppState {
    pub fn new(inference: InferenceClient, syncer: Arc<dyn Syncer>) -> Self {
        Self { inference, syncer }
    }
}
