//! Caller-facing result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a reply request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReplyResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: Some(error.into()),
        }
    }
}

/// Outcome of an API key check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn valid(service: impl Into<String>) -> Self {
        Self {
            valid: true,
            service: Some(service.into()),
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            service: None,
            error: Some(error.into()),
        }
    }
}

/// Snapshot of the policy's configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyStatus {
    pub available: bool,
    pub has_api_key: bool,
}

/// One rendered chat message, as the UI keeps it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub text: String,
    pub is_from_user: bool,
    pub timestamp: DateTime<Utc>,
}

/// Plain texts of prior turns, oldest first
pub fn context_texts(turns: &[ChatTurn]) -> Vec<String> {
    turns.iter().map(|turn| turn.text.clone()).collect()
}
