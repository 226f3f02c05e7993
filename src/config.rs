//! Process configuration from the environment

use crate::llm::{AppIdentity, DEFAULT_BASE_URL};
use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var} value {value:?}: expected a port number")]
    InvalidPort { var: &'static str, value: String },
}

/// Everything the server needs at startup
#[derive(Debug, Clone)]
pub struct CompanionConfig {
    pub port: u16,
    /// Initial API key; the UI can replace or clear it at runtime
    pub api_key: Option<String>,
    /// Chat-completion API root
    pub base_url: String,
    pub identity: AppIdentity,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            identity: AppIdentity::default(),
        }
    }
}

impl CompanionConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup; empty values count as unset
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match var("BAYMAX_PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidPort {
                var: "BAYMAX_PORT",
                value,
            })?,
            None => defaults.port,
        };

        Ok(Self {
            port,
            api_key: var("BAYMAX_AI_API_KEY").or_else(|| var("OPENROUTER_API_KEY")),
            base_url: var("BAYMAX_OPENROUTER_URL").unwrap_or(defaults.base_url),
            identity: AppIdentity {
                referer: var("BAYMAX_HTTP_REFERER").unwrap_or(defaults.identity.referer),
                title: var("BAYMAX_APP_TITLE").unwrap_or(defaults.identity.title),
            },
        })
    }
}
