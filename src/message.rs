// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AskRequest {
    #[serde(default)]
    pub message: Option<Value>,
}

impl AskRequest {
    /// Text to relay, if `message` is truthy. Non-string values are sent as their JSON text.
    pub fn into_message(self) -> Option<String> {
        match self.message? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AskResponse {
    pub response: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReportResponse {
    pub report: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SyncResponse {
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
