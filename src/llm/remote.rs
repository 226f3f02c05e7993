//! Remote reply path: prompt assembly and the sequential candidate loop

use super::endpoints::{default_candidates, validation_probe, EndpointCandidate};
use super::types::{ChatCall, ChatMessage};
use super::{ChatTransport, LlmError};
use std::sync::Arc;
use std::time::Duration;

const SYSTEM_PROMPT: &str = "You are BayMax, a compassionate AI mental health companion. \
You provide supportive, empathetic responses while maintaining appropriate boundaries. \
You help users with emotional support, stress management, and general well-being. \
Always be kind, understanding, and encouraging. \
Keep responses conversational and not too long (2-4 sentences).";

/// Prior utterances injected into the prompt
pub const CONTEXT_WINDOW: usize = 4;

const CHAT_TIMEOUT: Duration = Duration::from_secs(15);
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the hosted chat-completion provider
pub struct RemoteModelClient {
    transport: Arc<dyn ChatTransport>,
    candidates: Vec<EndpointCandidate>,
    probe: (EndpointCandidate, Vec<ChatMessage>),
}

impl RemoteModelClient {
    pub fn new(transport: Arc<dyn ChatTransport>, base_url: &str) -> Self {
        Self {
            transport,
            candidates: default_candidates(base_url),
            probe: validation_probe(base_url),
        }
    }

    /// System prompt, the most recent context window, then the user message.
    ///
    /// Context roles alternate by position within the window, starting with
    /// user; the conversation history carries no speaker information.
    pub fn build_messages(message: &str, context: &[String]) -> Vec<ChatMessage> {
        let recent = &context[context.len().saturating_sub(CONTEXT_WINDOW)..];

        let mut messages = Vec::with_capacity(recent.len() + 2);
        messages.push(ChatMessage::system(SYSTEM_PROMPT));
        for (index, text) in recent.iter().enumerate() {
            messages.push(if index % 2 == 0 {
                ChatMessage::user(text.clone())
            } else {
                ChatMessage::assistant(text.clone())
            });
        }
        messages.push(ChatMessage::user(message));
        messages
    }

    /// Try each candidate in order; the first non-empty completion wins.
    ///
    /// Returns `None` once every candidate has failed. Candidates run strictly
    /// one after another, so the worst case is the sum of their timeouts.
    pub async fn try_reply(&self, api_key: &str, message: &str, context: &[String]) -> Option<String> {
        let messages = Self::build_messages(message, context);

        for candidate in &self.candidates {
            let call = ChatCall {
                name: candidate.name.clone(),
                url: candidate.url.clone(),
                api_key: api_key.to_string(),
                body: candidate.request(messages.clone()),
                timeout: CHAT_TIMEOUT,
            };

            match self.transport.complete(&call).await {
                Ok(text) if !text.is_empty() => {
                    tracing::info!(endpoint = %candidate.name, "Remote reply received");
                    return Some(text);
                }
                Ok(_) => {
                    tracing::debug!(endpoint = %candidate.name, "Remote reply was empty, trying next endpoint");
                }
                // LoggingTransport already reports the failure itself
                Err(e) => {
                    tracing::debug!(endpoint = %candidate.name, kind = ?e.kind, "Trying next endpoint");
                }
            }
        }

        tracing::warn!(tried = self.candidates.len(), "All remote endpoints failed");
        None
    }

    /// Single minimal call used for key validation
    pub async fn probe(&self, api_key: &str) -> Result<String, LlmError> {
        let (candidate, messages) = &self.probe;
        let call = ChatCall {
            name: candidate.name.clone(),
            url: candidate.url.clone(),
            api_key: api_key.to_string(),
            body: candidate.request(messages.clone()),
            timeout: PROBE_TIMEOUT,
        };
        self.transport.complete(&call).await
    }
}
