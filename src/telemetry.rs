//! Logging setup and request spans.
//!
//! Logs go through `tracing`; the subscriber is a `tracing-subscriber`
//! registry with an `EnvFilter` and either a JSON or a compact fmt layer.

use tracing::info;
use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Registry,
};
use uuid::Uuid;

use crate::config::Config;
use crate::constants::service::REQUEST_ID_LEN;

/// Configuration for log output.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Log level filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Emit JSON lines instead of compact text.
    pub json: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: true,
        }
    }
}

impl From<&Config> for TracingConfig {
    fn from(config: &Config) -> Self {
        Self {
            log_level: config.log_level.clone(),
            json: config.json_logs,
        }
    }
}

/// Install the global tracing subscriber.
pub fn init_tracing(config: TracingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = Registry::default().with(env_filter);

    if config.json {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_thread_ids(true)
                    .with_current_span(true),
            )
            .try_init()?;
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .compact(),
            )
            .try_init()?;
    }

    info!(level = %config.log_level, json = config.json, "Tracing initialized");
    Ok(())
}

/// Short request id used to correlate the log lines of one request.
pub fn new_request_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(REQUEST_ID_LEN);
    id
}

/// Truncate text for logging, appending `...` when shortened.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Create a tracing span for one translation request.
#[macro_export]
macro_rules! translate_span {
    ($request_id:expr) => {
        tracing::info_span!(
            "haptic_translate",
            request_id = %$request_id,
            use_cache = tracing::field::Empty,
            cached = tracing::field::Empty,
            processing_time_ms = tracing::field::Empty,
        )
    };
}
