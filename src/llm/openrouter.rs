//! `OpenRouter` transport over reqwest

use super::types::{ChatCall, CompletionResponse, ProviderErrorResponse};
use super::{ChatTransport, LlmError, LlmErrorKind};
use async_trait::async_trait;
use reqwest::Client;

/// Values for the two headers `OpenRouter` uses to attribute traffic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentity {
    /// Sent as `HTTP-Referer`
    pub referer: String,
    /// Sent as `X-Title`
    pub title: String,
}

impl Default for AppIdentity {
    fn default() -> Self {
        Self {
            referer: "https://baymax-mental-health.vercel.app".to_string(),
            title: "BayMax Mental Health App".to_string(),
        }
    }
}

/// `OpenAI`-compatible chat transport
pub struct OpenRouterTransport {
    client: Client,
    identity: AppIdentity,
}

impl OpenRouterTransport {
    pub fn new(identity: AppIdentity) -> Result<Self, LlmError> {
        // Timeouts are applied per call, so the client itself has none
        let client = Client::builder()
            .build()
            .map_err(|e| LlmError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, identity })
    }

    fn classify_send_error(e: &reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::network(format!("Request timeout: {e}"))
        } else if e.is_connect() {
            LlmError::network(format!("Connection failed: {e}"))
        } else {
            LlmError::unknown(format!("Request failed: {e}"))
        }
    }
}

#[async_trait]
impl ChatTransport for OpenRouterTransport {
    async fn complete(&self, call: &ChatCall) -> Result<String, LlmError> {
        tracing::debug!(endpoint = %call.name, model = %call.body.model, "Sending completion request");

        let response = self
            .client
            .post(&call.url)
            .timeout(call.timeout)
            .bearer_auth(&call.api_key)
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", &self.identity.referer)
            .header("X-Title", &self.identity.title)
            .json(&call.body)
            .send()
            .await
            .map_err(|e| Self::classify_send_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(error_from_status(status.as_u16(), &body));
        }

        parse_completion(&body)
    }
}

/// Build an error for a non-2xx answer, preferring the provider's own message
fn error_from_status(status: u16, body: &str) -> LlmError {
    let kind = LlmErrorKind::from_status(status);
    let message = match serde_json::from_str::<ProviderErrorResponse>(body) {
        Ok(resp) if !resp.error.message.is_empty() => resp.error.message,
        _ => format!("HTTP {status} error: {body}"),
    };
    LlmError::new(kind, message).with_status(status)
}

/// Extract `choices[0].message.content` from a 2xx body
fn parse_completion(body: &str) -> Result<String, LlmError> {
    let resp: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::malformed(format!("Failed to parse response: {e} - body: {body}")))?;

    resp.into_content()
        .ok_or_else(|| LlmError::malformed("No completion content in response"))
}
