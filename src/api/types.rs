//! API request and response types

use crate::policy::{ChatTurn, ReplyResult, ValidationResult};
use serde::{Deserialize, Serialize};

/// Request to reply to a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Prior turns, oldest first
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// Request to analyze a journal entry
#[derive(Debug, Deserialize)]
pub struct JournalRequest {
    pub entry: String,
}

/// Request carrying an API key
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyRequest {
    pub api_key: String,
}

/// Response for the settings panel's end-to-end check
#[derive(Debug, Serialize)]
pub struct AiTestResponse {
    pub validation: ValidationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<ReplyResult>,
}

/// Version information
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
