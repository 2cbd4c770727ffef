//! In-process pattern cache.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use super::{CacheError, CacheStatus, PatternCache};
use crate::haptic::TranslationResult;

#[derive(Debug, Default)]
struct Entries {
    results: HashMap<String, TranslationResult>,
    /// Keys in first-insertion order.
    order: Vec<String>,
}

/// Unbounded in-memory [`PatternCache`] guarded by a single lock.
#[derive(Debug, Default)]
pub struct InMemoryPatternCache {
    entries: RwLock<Entries>,
}

impl InMemoryPatternCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().results.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PatternCache for InMemoryPatternCache {
    async fn get(&self, key: &str) -> Result<Option<TranslationResult>, CacheError> {
        Ok(self.entries.read().results.get(key).cloned())
    }

    async fn put(&self, key: &str, result: TranslationResult) -> Result<(), CacheError> {
        let mut entries = self.entries.write();
        if entries.results.insert(key.to_string(), result).is_none() {
            entries.order.push(key.to_string());
        }
        Ok(())
    }

    async fn clear(&self) -> Result<usize, CacheError> {
        let mut entries = self.entries.write();
        let removed = entries.results.len();
        entries.results.clear();
        entries.order.clear();
        debug!(removed, "Cleared pattern cache");
        Ok(removed)
    }

    async fn status(&self) -> Result<CacheStatus, CacheError> {
        let entries = self.entries.read();
        Ok(CacheStatus {
            entries: entries.results.len(),
            keys: entries.order.clone(),
        })
    }
}
