//! The `haptic_pattern_server` core library.
//!
//! This crate compiles text into timed haptic vibration patterns over a
//! dot/dash alphabet, memoizes compiled patterns, and serves them over HTTP.

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod haptic;
pub mod server;
pub mod service;
pub mod telemetry;
