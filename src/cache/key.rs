//! Cache key derivation.
//!
//! `(text, preferences)` is reduced to exactly what the compiler consumes:
//! trimmed text with ASCII letters upper-cased, and preferences rounded to
//! two decimals. That form is serialized to canonical JSON and hashed with
//! BLAKE3, so equal keys always mean equal compiled patterns.

use serde::Serialize;

use super::CacheError;
use crate::constants::{cache::KEY_PREFIX, preferences::DECIMALS};
use crate::haptic::Preferences;

/// Canonical form hashed into the key. Field order is part of the format.
#[derive(Serialize)]
struct NormalizedRequest<'a> {
    intensity: String,
    speed: String,
    text: &'a str,
}

/// Derive the cache key for a compile request.
///
/// Equal normalized inputs always yield the same key.
pub fn derive_key(text: &str, prefs: &Preferences) -> Result<String, CacheError> {
    // Only ASCII case folding: the alphabet skips every non-ASCII character,
    // so Unicode folding ('ß' -> "SS") would merge different patterns.
    let text: String = text.trim().chars().map(|c| c.to_ascii_uppercase()).collect();
    let prefs = prefs.normalized();
    let normalized = NormalizedRequest {
        intensity: format_preference(prefs.intensity()),
        speed: format_preference(prefs.speed()),
        text: &text,
    };

    let mut hasher = blake3::Hasher::new();
    serde_json::to_writer(&mut hasher, &normalized)?;
    Ok(format!("{}{}", KEY_PREFIX, hasher.finalize().to_hex()))
}

fn format_preference(value: f64) -> String {
    format!("{:.*}", DECIMALS as usize, value)
}
