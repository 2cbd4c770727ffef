//! Memoization of compiled haptic patterns.
//!
//! This module provides the cache key deriver and the [`PatternCache`]
//! abstraction, allowing the in-memory store to be swapped for a networked
//! backend with the same get/put/clear/status semantics.

mod key;
mod memory;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::haptic::TranslationResult;

pub use key::derive_key;
pub use memory::InMemoryPatternCache;

/// Errors raised by cache backends and key derivation.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The canonical request could not be serialized.
    #[error("cache key derivation failed: {0}")]
    KeyDerivation(#[from] serde_json::Error),

    /// The backing store could not be reached or refused the operation.
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
}

/// Snapshot of the cache contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStatus {
    /// Number of stored entries.
    pub entries: usize,

    /// Stored keys in insertion order.
    pub keys: Vec<String>,
}

/// Key to compiled-result store shared across concurrent callers.
///
/// Every operation is atomic with respect to the others. Entries never
/// expire; they live until [`PatternCache::clear`] is called.
#[async_trait]
pub trait PatternCache: Send + Sync {
    /// Look up a stored result without side effects.
    async fn get(&self, key: &str) -> Result<Option<TranslationResult>, CacheError>;

    /// Store a result, replacing any entry under the same key.
    async fn put(&self, key: &str, result: TranslationResult) -> Result<(), CacheError>;

    /// Remove every entry and return how many were removed.
    async fn clear(&self) -> Result<usize, CacheError>;

    /// Count and list the stored keys.
    async fn status(&self) -> Result<CacheStatus, CacheError>;
}
