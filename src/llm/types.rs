//! Wire types for `OpenAI`-compatible chat completions

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One entry of the `messages` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request body posted to the completion endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// A single outbound call: where, with which key, what body, how long
#[derive(Debug, Clone)]
pub struct ChatCall {
    /// Human-readable endpoint label, used for logging
    pub name: String,
    pub url: String,
    pub api_key: String,
    pub body: CompletionRequest,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompletionChoice {
    pub message: Option<CompletionMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompletionMessage {
    pub content: Option<String>,
}

impl CompletionResponse {
    /// `choices[0].message.content`, if present and non-empty
    pub fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProviderErrorResponse {
    pub error: ProviderError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProviderError {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_missing_temperature() {
        let request = CompletionRequest {
            model: "qwen/qwen2.5-7b-instruct".to_string(),
            messages: vec![ChatMessage::user("Hello")],
            max_tokens: 50,
            temperature: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("temperature").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 50);
    }

    #[test]
    fn test_content_extraction() {
        let resp: CompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Hi there"}}]}"#,
        )
        .unwrap();
        assert_eq!(resp.into_content().as_deref(), Some("Hi there"));
    }

    #[test]
    fn test_content_extraction_rejects_empty_shapes() {
        for body in [
            r#"{"choices":[]}"#,
            r"{}",
            r#"{"choices":[{"message":{"content":""}}]}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
            r#"{"choices":[{"finish_reason":"stop"}]}"#,
        ] {
            let resp: CompletionResponse = serde_json::from_str(body).unwrap();
            assert!(resp.into_content().is_none(), "expected no content for {body}");
        }
    }
}
