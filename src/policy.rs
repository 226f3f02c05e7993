//! Conversational response policy
//!
//! Resolves one chat turn into a reply: a remote model when an API key is
//! configured, the keyword classifier otherwise or when every remote
//! endpoint fails. Chat replies never surface an error to the caller.

mod classifier;
mod random;
mod types;

#[cfg(test)]
mod proptests;

#[allow(unused_imports)] // Public API re-exports
pub use classifier::Intent;
pub use random::{RandomSource, ThreadRandom};
pub use types::{context_texts, ChatTurn, PolicyStatus, ReplyResult, ValidationResult};

use crate::llm::{LlmErrorKind, RemoteModelClient};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

const JOURNAL_PREFIX: &str = "Please analyze this journal entry and provide supportive feedback: ";
const JOURNAL_APOLOGY: &str =
    "I'm having trouble analyzing your journal entry right now. Please try again later.";

const VALIDATION_SERVICE: &str = "OpenRouter";
const VALIDATION_NO_REPLY: &str = "API key is invalid or service is unavailable";
const VALIDATION_GENERIC: &str = "API validation failed";

/// Internal failures while producing a reply
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("reply index {index} is outside a pool of {pool_size}")]
    ReplySelection { index: usize, pool_size: usize },
}

/// Mutable configuration. Only the API key for now.
#[derive(Clone, Default)]
pub struct PolicyConfig {
    pub api_key: Option<String>,
}

/// The reply resolver shared by every request handler
pub struct ResponsePolicy {
    remote: RemoteModelClient,
    random: Arc<dyn RandomSource>,
    config: RwLock<PolicyConfig>,
    /// Serializes `initialize` and `validate_api_key` so a key swap can
    /// never interleave with a reconfiguration
    config_writes: tokio::sync::Mutex<()>,
    conversation: Mutex<Vec<String>>,
}

impl ResponsePolicy {
    pub fn new(remote: RemoteModelClient, random: Arc<dyn RandomSource>) -> Self {
        Self {
            remote,
            random,
            config: RwLock::new(PolicyConfig::default()),
            config_writes: tokio::sync::Mutex::new(()),
            conversation: Mutex::new(Vec::new()),
        }
    }

    /// Set or clear the API key. An empty key counts as no key.
    pub async fn initialize(&self, api_key: Option<String>) {
        let _writer = self.config_writes.lock().await;
        let api_key = api_key.filter(|key| !key.is_empty());
        tracing::info!(has_api_key = api_key.is_some(), "Response policy configured");
        write_config(&self.config).api_key = api_key;
    }

    pub fn status(&self) -> PolicyStatus {
        PolicyStatus {
            available: true,
            has_api_key: read_config(&self.config).api_key.is_some(),
        }
    }

    /// Most recent `context + [message]` seen by the policy
    #[allow(dead_code)] // API completeness
    pub fn conversation_snapshot(&self) -> Vec<String> {
        self.conversation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reply to a chat message. Always succeeds with displayable text.
    pub async fn get_reply(&self, message: &str, context: &[String]) -> ReplyResult {
        match self.resolve_reply(message, context).await {
            Ok(text) => ReplyResult::ok(text),
            Err(e) => {
                tracing::error!(error = %e, "Fallback reply selection failed");
                ReplyResult::ok(classifier::LAST_RESORT_REPLY)
            }
        }
    }

    /// Supportive feedback on a journal entry.
    ///
    /// Unlike chat, an internal failure is reported to the caller instead of
    /// being papered over.
    pub async fn get_journal_analysis(&self, entry: &str) -> ReplyResult {
        let prompt = format!("{JOURNAL_PREFIX}{entry}");
        match self.resolve_reply(&prompt, &[]).await {
            Ok(text) => ReplyResult::ok(text),
            Err(e) => {
                tracing::error!(error = %e, "Journal analysis failed");
                ReplyResult::failed(JOURNAL_APOLOGY, e.to_string())
            }
        }
    }

    /// Check a key with one minimal remote call.
    ///
    /// The candidate is swapped into the configuration for the duration of
    /// the call and the previous key is put back afterwards, whatever happens.
    pub async fn validate_api_key(&self, candidate: &str) -> ValidationResult {
        let _writer = self.config_writes.lock().await;
        let _swap = KeySwap::install(&self.config, candidate.to_string());

        tracing::info!("Testing API key");
        match self.remote.probe(candidate).await {
            Ok(_) => ValidationResult::valid(VALIDATION_SERVICE),
            Err(e) => {
                tracing::warn!(kind = ?e.kind, status = ?e.status, error = %e.message, "API key validation failed");
                if e.kind == LlmErrorKind::MalformedResponse {
                    ValidationResult::invalid(VALIDATION_NO_REPLY)
                } else if e.message.is_empty() {
                    ValidationResult::invalid(VALIDATION_GENERIC)
                } else {
                    ValidationResult::invalid(e.message)
                }
            }
        }
    }

    async fn resolve_reply(&self, message: &str, context: &[String]) -> Result<String, PolicyError> {
        self.record_conversation(message, context);

        let api_key = read_config(&self.config).api_key.clone();
        if let Some(key) = api_key {
            if let Some(text) = self.remote.try_reply(&key, message, context).await {
                return Ok(text);
            }
            tracing::info!("Remote reply unavailable, using fallback");
        } else {
            tracing::debug!("No API key configured, using fallback");
        }

        classifier::respond(message, context, self.random.as_ref()).map(str::to_string)
    }

    fn record_conversation(&self, message: &str, context: &[String]) {
        let mut snapshot = context.to_vec();
        snapshot.push(message.to_string());
        *self
            .conversation
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    #[cfg(test)]
    fn api_key(&self) -> Option<String> {
        read_config(&self.config).api_key.clone()
    }
}

fn read_config(cell: &RwLock<PolicyConfig>) -> RwLockReadGuard<'_, PolicyConfig> {
    cell.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_config(cell: &RwLock<PolicyConfig>) -> RwLockWriteGuard<'_, PolicyConfig> {
    cell.write().unwrap_or_else(PoisonError::into_inner)
}

/// Installs a key and restores the previous one on drop
struct KeySwap<'a> {
    cell: &'a RwLock<PolicyConfig>,
    previous: Option<String>,
}

impl<'a> KeySwap<'a> {
    fn install(cell: &'a RwLock<PolicyConfig>, key: String) -> Self {
        let previous = write_config(cell).api_key.replace(key);
        Self { cell, previous }
    }
}

impl Drop for KeySwap<'_> {
    fn drop(&mut self) {
        write_config(self.cell).api_key = self.previous.take();
    }
}
