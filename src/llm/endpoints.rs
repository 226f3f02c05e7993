//! Endpoint candidates, in the order they are tried

use super::types::{ChatMessage, CompletionRequest};

/// `OpenRouter` API root
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

const CHAT_MAX_TOKENS: u32 = 300;
const CHAT_TEMPERATURE: f32 = 0.7;

const PROBE_MODEL: &str = "qwen/qwen2.5-7b-instruct";
const PROBE_MESSAGE: &str = "Hello, this is a test message.";
const PROBE_MAX_TOKENS: u32 = 50;

/// One model/URL combination tried during reply resolution
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointCandidate {
    pub name: String,
    pub url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

impl EndpointCandidate {
    fn chat(name: &str, base_url: &str, model: &str) -> Self {
        Self {
            name: name.to_string(),
            url: completions_url(base_url),
            model: model.to_string(),
            max_tokens: CHAT_MAX_TOKENS,
            temperature: Some(CHAT_TEMPERATURE),
        }
    }

    /// Request body for this candidate carrying the given messages
    pub fn request(&self, messages: Vec<ChatMessage>) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// The fixed chat candidate list. All three share one provider and differ
/// only in the underlying model.
pub fn default_candidates(base_url: &str) -> Vec<EndpointCandidate> {
    vec![
        EndpointCandidate::chat(
            "OpenRouter (Mistral)",
            base_url,
            "mistralai/mistral-7b-instruct",
        ),
        EndpointCandidate::chat("OpenRouter (Qwen)", base_url, PROBE_MODEL),
        EndpointCandidate::chat("OpenRouter (GPT-3.5)", base_url, "openai/gpt-3.5-turbo"),
    ]
}

/// Minimal-token call used to check whether an API key works
pub fn validation_probe(base_url: &str) -> (EndpointCandidate, Vec<ChatMessage>) {
    let candidate = EndpointCandidate {
        name: "OpenRouter (key check)".to_string(),
        url: completions_url(base_url),
        model: PROBE_MODEL.to_string(),
        max_tokens: PROBE_MAX_TOKENS,
        temperature: None,
    };
    (candidate, vec![ChatMessage::user(PROBE_MESSAGE)])
}

fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_order() {
        let candidates = default_candidates(DEFAULT_BASE_URL);
        let models: Vec<_> = candidates.iter().map(|c| c.model.as_str()).collect();
        assert_eq!(
            models,
            [
                "mistralai/mistral-7b-instruct",
                "qwen/qwen2.5-7b-instruct",
                "openai/gpt-3.5-turbo"
            ]
        );
        for candidate in &candidates {
            assert_eq!(
                candidate.url,
                "https://openrouter.ai/api/v1/chat/completions"
            );
            assert_eq!(candidate.max_tokens, 300);
            assert!(candidate
                .temperature
                .is_some_and(|t| (t - 0.7).abs() < f32::EPSILON));
        }
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let candidates = default_candidates("http://127.0.0.1:9000/v1/");
        assert_eq!(candidates[0].url, "http://127.0.0.1:9000/v1/chat/completions");
    }

    #[test]
    fn test_probe_is_minimal() {
        let (candidate, messages) = validation_probe(DEFAULT_BASE_URL);
        assert_eq!(candidate.max_tokens, 50);
        assert!(candidate.temperature.is_none());
        assert_eq!(messages, vec![ChatMessage::user("Hello, this is a test message.")]);
    }
}
