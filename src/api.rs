//! HTTP API for the companion UI
//!
//! The browser shell owns transcripts and settings; it calls in here for
//! replies, journal feedback and AI key management.

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::policy::ResponsePolicy;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub policy: Arc<ResponsePolicy>,
}

impl AppState {
    pub fn new(policy: Arc<ResponsePolicy>) -> Self {
        Self { policy }
    }
}
