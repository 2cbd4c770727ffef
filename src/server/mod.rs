//! Web server and API implementation.
//!
//! This module provides the HTTP server functionality for the haptic
//! translation service.

mod handlers;
mod metrics;
mod shutdown;
mod state;

pub use handlers::{
    cache_status, clear_cache, create_router, handle_translate, health_check, metrics_handler,
    TranslateRequest,
};
pub use metrics::ServiceMetrics;
pub use shutdown::shutdown_signal;
pub use state::AppState;
