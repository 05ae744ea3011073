// src/services/inference.rs
use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

pub const DEFAULT_INFERENCE_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/blenderbot-400M-distill";

pub const BUSINESS_REPORT_PROMPT: &str =
    "Generate a weekly financial report with revenue, expenses, and insights.";

pub const NO_CREDENTIAL_TEXT: &str = "❌ No Hugging Face API key provided.";
pub const UPSTREAM_UNAVAILABLE_TEXT: &str = "❌ Error connecting to Hugging Face API.";
pub const MALFORMED_RESPONSE_TEXT: &str = "Unexpected response from Hugging Face API.";

/// Bearer token for the inference API. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for an empty key so callers treat it as unset.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        if key.is_empty() { None } else { Some(Self(key)) }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// What happened to a single relayed prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    Success(String),
    NoCredential,
    UpstreamUnavailable,
    MalformedResponse,
}

impl RelayOutcome {
    /// Text shown to the caller. Failures collapse to fixed strings.
    pub fn into_text(self) -> String {
        match self {
            RelayOutcome::Success(text) => text,
            RelayOutcome::NoCredential => NO_CREDENTIAL_TEXT.to_string(),
            RelayOutcome::UpstreamUnavailable => UPSTREAM_UNAVAILABLE_TEXT.to_string(),
            RelayOutcome::MalformedResponse => MALFORMED_RESPONSE_TEXT.to_string(),
        }
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Pulls a non-empty string `generated_text` out of an upstream JSON object.
/// Any other shape, arrays included, yields `None`.
fn extract_generated_text(body: &[u8]) -> Option<String> {
    let parsed: Value = serde_json::from_slice(body).ok()?;
    parsed
        .get("generated_text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

const LOG_PREVIEW_BYTES: usize = 512;

/// Leading slice of an upstream body, for logs.
fn body_preview(body: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(&body[..body.len().min(LOG_PREVIEW_BYTES)])
}

/// Client for the hosted text-inference endpoint.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: Client,
    endpoint: Url,
    credential: Option<Credential>,
}

impl InferenceClient {
    pub fn new(
        endpoint: Url,
        credential: Option<Credential>,
        timeout: Option<Duration>,
    ) -> reqwest::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            endpoint,
            credential,
        })
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends `text` upstream once and classifies the result.
    pub async fn relay(&self, text: &str) -> RelayOutcome {
        let Some(credential) = &self.credential else {
            debug!("No credential configured, skipping upstream call");
            return RelayOutcome::NoCredential;
        };

        let response = match self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(credential.expose())
            .json(&InferenceRequest { inputs: text })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "❌ API Error: request to inference endpoint failed");
                return RelayOutcome::UpstreamUnavailable;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(
                %status,
                body = %body_preview(body.as_bytes()),
                "❌ API Error: inference endpoint returned an error status"
            );
            return RelayOutcome::UpstreamUnavailable;
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "❌ API Error: failed to read inference response body");
                return RelayOutcome::UpstreamUnavailable;
            }
        };

        match extract_generated_text(&body) {
            Some(text) => RelayOutcome::Success(text),
            None => {
                warn!(
                    body = %body_preview(&body),
                    "Inference response carried no generated_text"
                );
                RelayOutcome::MalformedResponse
            }
        }
    }
}
