//! `BayMax` companion backend
//!
//! Serves chat replies, journal feedback and AI key management to the
//! wellness web client. Replies come from a hosted model when a key is
//! configured and from a local keyword responder otherwise.

mod api;
mod config;
mod llm;
mod policy;

use api::{create_router, AppState};
use config::CompanionConfig;
use llm::{ChatTransport, LoggingTransport, OpenRouterTransport, RemoteModelClient};
use policy::{ResponsePolicy, ThreadRandom};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "baymax_companion=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = CompanionConfig::from_env()?;

    // Remote model plumbing
    let transport: Arc<dyn ChatTransport> = Arc::new(LoggingTransport::new(Arc::new(
        OpenRouterTransport::new(config.identity.clone())?,
    )));
    let remote = RemoteModelClient::new(transport, &config.base_url);

    let policy = Arc::new(ResponsePolicy::new(remote, Arc::new(ThreadRandom)));
    policy.initialize(config.api_key.clone()).await;

    if policy.status().has_api_key {
        tracing::info!(base_url = %config.base_url, "Remote replies enabled");
    } else {
        tracing::warn!("No API key configured. Set BAYMAX_AI_API_KEY or add one from the settings panel.");
    }

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(AppState::new(policy))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("BayMax companion listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
