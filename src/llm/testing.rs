//! Mock transport for testing

use super::{ChatCall, ChatTransport, LlmError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock transport that returns queued results
pub struct MockTransport {
    results: Mutex<VecDeque<Result<String, LlmError>>>,
    /// Record of all calls made
    pub calls: Mutex<Vec<ChatCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful completion
    pub fn queue_reply(&self, text: impl Into<String>) {
        self.results.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queue an error result
    pub fn queue_error(&self, error: LlmError) {
        self.results.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded calls
    pub fn recorded_calls(&self) -> Vec<ChatCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn complete(&self, call: &ChatCall) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(call.clone());
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }
}
