//! HTTP request handlers.
//!
//! This module provides the HTTP handlers for the haptic translation service.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn, Instrument, Span};

use crate::constants::service::{LOG_TEXT_PREVIEW_CHARS, NAME, VERSION};
use crate::error::{AppError, Result};
use crate::haptic::PreferencesInput;
use crate::server::AppState;
use crate::service::Translation;
use crate::telemetry::{new_request_id, preview};
use crate::translate_span;

/// Request body for a translation.
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    /// Text to translate
    #[serde(default)]
    text: Option<String>,

    /// Optional speed/intensity preferences
    #[serde(default)]
    preferences: Option<PreferencesInput>,

    /// Whether the cache may be used
    #[serde(default = "default_true")]
    use_cache: bool,
}

fn default_true() -> bool {
    true
}

/// Handle a text to haptic pattern translation.
pub async fn handle_translate(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<Translation>> {
    let request_id = new_request_id();
    let span = translate_span!(request_id);

    async move {
        let start = Instant::now();
        state.metrics.record_request();
        info!("Received haptic translation request");

        let outcome = translate(&state, payload).await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        Span::current().record("processing_time_ms", elapsed_ms as u64);

        match outcome {
            Ok((translation, use_cache)) => {
                state.metrics.record_translation(use_cache, translation.cached);
                info!(
                    "Successfully processed haptic translation in {:.2}ms. Pattern length: {}, Duration: {}ms",
                    elapsed_ms,
                    translation.result.pattern.len(),
                    translation.result.total_duration_ms
                );
                Ok(Json(translation))
            }
            Err(e) => {
                if e.is_client_error() {
                    state.metrics.record_rejection();
                    warn!("Rejected haptic translation request: {}", e);
                } else {
                    state.metrics.record_error();
                }
                Err(e)
            }
        }
    }
    .instrument(span)
    .await
}

async fn translate(
    state: &AppState,
    payload: std::result::Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<(Translation, bool)> {
    let Json(request) = payload.map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))?;

    if let Some(text) = request.text.as_deref() {
        info!("Processing text: '{}'", preview(text, LOG_TEXT_PREVIEW_CHARS));
    }
    Span::current().record("use_cache", request.use_cache);

    let translation = state
        .service
        .translate(
            request.text.as_deref(),
            request.preferences.unwrap_or_default(),
            request.use_cache,
        )
        .await?;
    Span::current().record("cached", translation.cached);

    Ok((translation, request.use_cache))
}

/// Clear the haptic pattern cache.
pub async fn clear_cache(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let removed = state.service.clear_cache().await?;
    state.metrics.record_cache_clear();
    Ok(Json(serde_json::json!({
        "message": format!("Cache cleared successfully. Removed {} entries.", removed),
        "removedCount": removed,
        "cacheSize": 0,
    })))
}

/// Report cache size and the first stored keys.
pub async fn cache_status(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let mut status = state.service.cache_status().await?;
    status.keys.truncate(state.max_status_keys);
    Ok(Json(status))
}

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": NAME,
        "version": VERSION
    }))
}

/// Metrics endpoint.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.metrics.to_json())
}

/// Create the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let request_timeout = state.request_timeout;
    Router::new()
        .route("/", get(health_check))
        .route("/haptic_translate", post(handle_translate))
        .route("/haptic_translate/", post(handle_translate))
        .route("/cache/clear", post(clear_cache))
        .route("/cache/status", get(cache_status))
        .route("/metrics", get(metrics_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
