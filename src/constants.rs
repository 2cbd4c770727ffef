//! Domain constants for the haptic pattern server.
//!
//! This module contains compile-time constants used throughout the application.
//! These are separated from runtime configuration to provide clear distinction
//! between values that never change and those that can be configured.

/// Base timings in milliseconds, before speed scaling.
pub mod timing {
    /// Length of a dot vibration.
    pub const DOT_MS: u64 = 100;

    /// Length of a dash vibration.
    pub const DASH_MS: u64 = 300;

    /// Pause between characters of one word.
    pub const LETTER_SPACE_MS: u64 = 200;

    /// Pause produced by a space.
    pub const WORD_SPACE_MS: u64 = 600;

    /// Pause produced by sentence punctuation.
    pub const SENTENCE_SPACE_MS: u64 = 900;
}

/// Preference bounds and defaults.
pub mod preferences {
    /// Slowest accepted speed factor.
    pub const MIN_SPEED: f64 = 0.1;

    /// Fastest accepted speed factor.
    pub const MAX_SPEED: f64 = 3.0;

    /// Speed used when the caller omits it.
    pub const DEFAULT_SPEED: f64 = 1.0;

    pub const MIN_INTENSITY: f64 = 0.0;
    pub const MAX_INTENSITY: f64 = 1.0;

    /// Intensity used when the caller omits it.
    pub const DEFAULT_INTENSITY: f64 = 0.8;

    /// Decimal places preferences are rounded to before compiling or hashing.
    pub const DECIMALS: i32 = 2;
}

/// Cache key derivation.
pub mod cache {
    /// Prefix of every derived cache key.
    pub const KEY_PREFIX: &str = "haptic_pattern:";
}

/// Service identity reported by the health endpoint.
pub mod service {
    pub const NAME: &str = "Haptic Feedback API";
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Length of the per-request id used in logs.
    pub const REQUEST_ID_LEN: usize = 8;

    /// Characters of input text echoed into logs.
    pub const LOG_TEXT_PREVIEW_CHARS: usize = 50;
}
