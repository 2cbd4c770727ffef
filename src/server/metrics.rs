//! Service metrics tracking.
//!
//! This module provides metrics tracking for the translation service.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Tracks request counts and cache effectiveness.
#[derive(Debug, Clone)]
pub struct ServiceMetrics {
    /// Total number of translation requests received
    total_requests: Arc<AtomicU64>,

    /// Requests answered from the cache
    cache_hits: Arc<AtomicU64>,

    /// Cached requests that had to be compiled
    cache_misses: Arc<AtomicU64>,

    /// Requests that asked to skip the cache
    cache_bypasses: Arc<AtomicU64>,

    /// Requests rejected as invalid
    rejected_requests: Arc<AtomicU64>,

    /// Requests that failed on the server side
    errors: Arc<AtomicU64>,

    /// Number of cache clears
    cache_clears: Arc<AtomicU64>,

    /// Server start time
    start_time: Instant,
}

impl ServiceMetrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            total_requests: Arc::new(AtomicU64::new(0)),
            cache_hits: Arc::new(AtomicU64::new(0)),
            cache_misses: Arc::new(AtomicU64::new(0)),
            cache_bypasses: Arc::new(AtomicU64::new(0)),
            rejected_requests: Arc::new(AtomicU64::new(0)),
            errors: Arc::new(AtomicU64::new(0)),
            cache_clears: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    /// Count an incoming translation request.
    pub fn record_request(&self) {
        self.total_requests.fetch_add(1, Ordering::SeqCst);
    }

    /// Record how a successful translation used the cache.
    pub fn record_translation(&self, use_cache: bool, cached: bool) {
        let counter = match (use_cache, cached) {
            (false, _) => &self.cache_bypasses,
            (true, true) => &self.cache_hits,
            (true, false) => &self.cache_misses,
        };
        counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Record a request rejected by validation.
    pub fn record_rejection(&self) {
        self.rejected_requests.fetch_add(1, Ordering::SeqCst);
    }

    /// Record an error.
    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }

    /// Record a cache clear.
    pub fn record_cache_clear(&self) {
        self.cache_clears.fetch_add(1, Ordering::SeqCst);
    }

    /// Fraction of cache lookups that hit, `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.cache_hits.load(Ordering::SeqCst);
        let misses = self.cache_misses.load(Ordering::SeqCst);
        if hits + misses == 0 {
            0.0
        } else {
            hits as f64 / (hits + misses) as f64
        }
    }

    /// Get all metrics as a serde_json::Value.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "uptime_seconds": self.start_time.elapsed().as_secs(),
            "total_requests": self.total_requests.load(Ordering::SeqCst),
            "cache_hits": self.cache_hits.load(Ordering::SeqCst),
            "cache_misses": self.cache_misses.load(Ordering::SeqCst),
            "cache_bypasses": self.cache_bypasses.load(Ordering::SeqCst),
            "cache_hit_rate": self.hit_rate(),
            "rejected_requests": self.rejected_requests.load(Ordering::SeqCst),
            "errors": self.errors.load(Ordering::SeqCst),
            "cache_clears": self.cache_clears.load(Ordering::SeqCst),
        })
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}
