//! Remote chat-completion plumbing
//!
//! A thin transport seam over an `OpenAI`-compatible endpoint, plus the
//! ordered candidate list the companion walks through for each reply.

mod endpoints;
mod error;
mod openrouter;
mod remote;
mod types;

#[cfg(test)]
pub mod testing;

pub use endpoints::DEFAULT_BASE_URL;
pub use error::{LlmError, LlmErrorKind};
pub use openrouter::{AppIdentity, OpenRouterTransport};
pub use remote::RemoteModelClient;
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Performs a single completion call. Implementations never retry.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Returns the completion text, or an error for anything that is not a
    /// well-formed reply with non-empty content.
    async fn complete(&self, call: &ChatCall) -> Result<String, LlmError>;
}

#[async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for Arc<T> {
    async fn complete(&self, call: &ChatCall) -> Result<String, LlmError> {
        (**self).complete(call).await
    }
}

/// Logging wrapper for transports
pub struct LoggingTransport {
    inner: Arc<dyn ChatTransport>,
}

impl LoggingTransport {
    pub fn new(inner: Arc<dyn ChatTransport>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ChatTransport for LoggingTransport {
    async fn complete(&self, call: &ChatCall) -> Result<String, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(call).await;
        let duration = start.elapsed();

        match &result {
            Ok(text) => {
                tracing::info!(
                    endpoint = %call.name,
                    model = %call.body.model,
                    duration_ms = %duration.as_millis(),
                    reply_chars = text.chars().count(),
                    "Completion request succeeded"
                );
            }
            Err(e) => {
                tracing::warn!(
                    endpoint = %call.name,
                    model = %call.body.model,
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    status = ?e.status,
                    error = %e.message,
                    "Completion request failed"
                );
            }
        }

        result
    }
}
