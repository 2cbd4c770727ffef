//! Haptic pattern server.
//!
//! This is the entry point for the server. It loads the configuration,
//! initializes logging, creates the process-wide pattern cache and starts
//! listening for requests.

use std::sync::Arc;
use tracing::info;

use haptic_pattern_server::{
    cache::InMemoryPatternCache,
    config::Config,
    error::{AppError, ErrorContext, Result},
    server::{create_router, shutdown_signal, AppState},
    telemetry::{init_tracing, TracingConfig},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize tracing
    init_tracing(TracingConfig::from(&config))
        .map_err(|e| AppError::Configuration(format!("Failed to initialize tracing: {}", e)))?;

    // Create the process-wide cache and application state
    let cache = Arc::new(InMemoryPatternCache::new());
    let state = Arc::new(AppState::new(cache, &config));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = config.bind_address();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
