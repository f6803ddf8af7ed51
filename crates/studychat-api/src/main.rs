//! Studychat API server entry point.

use std::error::Error;
use std::sync::Arc;

use studychat_api::config::AppConfig;
use studychat_api::state::AppState;
use studychat_core::clock::SystemClock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Studychat API server");

    let config = AppConfig::from_env()?;
    tracing::info!(
        topic = %config.topic,
        cursor_policy = ?config.cursor_policy,
        "configuration loaded"
    );

    let app_state = AppState::in_memory(&config, Arc::new(SystemClock));

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = studychat_api::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
