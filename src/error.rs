// src/error.rs
use std::path::PathBuf;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorResponse;

/// Errors surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        let body = ErrorResponse { error: self.to_string() };
        (status, Json(body)).into_response()
    }
}

/// Errors raised while assembling the process configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Unknown credential source '{0}' (expected 'file' or 'env')")]
    UnknownCredentialSource(String),

    #[error("Failed to read API config {}: {source}", path.display())]
    CredentialFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse API config {}: {source}", path.display())]
    CredentialParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
