//! Application state for dependency injection.
//!
//! This module provides the application state that is shared
//! between all request handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::PatternCache;
use crate::config::Config;
use crate::server::metrics::ServiceMetrics;
use crate::service::TranslationService;

/// Shared application state containing dependencies.
#[derive(Clone)]
pub struct AppState {
    /// Translation service over the process-wide pattern cache
    pub service: Arc<TranslationService>,

    /// Service metrics
    pub metrics: Arc<ServiceMetrics>,

    /// Maximum number of keys listed by the cache status endpoint
    pub max_status_keys: usize,

    /// Per-request timeout applied by the router
    pub request_timeout: Duration,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    /// * `cache` - The pattern cache shared by every request
    /// * `config` - Loaded application configuration
    pub fn new(cache: Arc<dyn PatternCache>, config: &Config) -> Self {
        Self {
            service: Arc::new(TranslationService::new(cache)),
            metrics: Arc::new(ServiceMetrics::new()),
            max_status_keys: config.max_status_keys,
            request_timeout: config.request_timeout,
        }
    }
}
