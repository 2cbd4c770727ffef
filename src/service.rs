//! Translation orchestration.
//!
//! The service validates a request, consults the pattern cache when asked to,
//! and compiles on a miss. Cache failures never fail a request: the service
//! logs them and falls back to compiling directly.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::{derive_key, CacheStatus, PatternCache};
use crate::error::{AppError, Result};
use crate::haptic::{compile, PreferencesInput, TranslationResult};

/// A compiled pattern and whether it was served from the cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Translation {
    #[serde(flatten)]
    pub result: TranslationResult,

    pub cached: bool,
}

/// Orchestrates key derivation, cache lookup and compilation.
#[derive(Clone)]
pub struct TranslationService {
    cache: Arc<dyn PatternCache>,
}

impl TranslationService {
    /// Create a service over the given cache.
    pub fn new(cache: Arc<dyn PatternCache>) -> Self {
        Self { cache }
    }

    /// Translate `text` into a haptic pattern.
    ///
    /// Validation happens before any cache or compile work. With `use_cache`
    /// unset the cache is neither read nor written.
    pub async fn translate(
        &self,
        text: Option<&str>,
        preferences: PreferencesInput,
        use_cache: bool,
    ) -> Result<Translation> {
        let text = match text {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(AppError::MissingText),
        };
        let prefs = preferences.validate()?.normalized();
        debug!(
            speed = prefs.speed(),
            intensity = prefs.intensity(),
            use_cache,
            "Validated preferences"
        );

        if !use_cache {
            info!("Cache bypassed as requested");
            return Ok(Translation {
                result: compile(text, &prefs)?,
                cached: false,
            });
        }

        let key = match derive_key(text, &prefs) {
            Ok(key) => key,
            Err(e) => {
                warn!("Cache key derivation failed, compiling directly: {}", e);
                return Ok(Translation {
                    result: compile(text, &prefs)?,
                    cached: false,
                });
            }
        };

        match self.cache.get(&key).await {
            Ok(Some(result)) => {
                info!(%key, "Cache HIT for haptic pattern");
                return Ok(Translation {
                    result,
                    cached: true,
                });
            }
            Ok(None) => info!(%key, "Cache MISS for haptic pattern"),
            Err(e) => warn!(%key, "Cache lookup failed, compiling directly: {}", e),
        }

        let result = compile(text, &prefs)?;
        self.store(&key, &result).await;
        Ok(Translation {
            result,
            cached: false,
        })
    }

    /// Remove every cached pattern, returning how many were removed.
    pub async fn clear_cache(&self) -> Result<usize> {
        let removed = self.cache.clear().await.map_err(AppError::internal)?;
        info!("Cache cleared. Removed {} entries.", removed);
        Ok(removed)
    }

    /// Snapshot of the cache contents.
    pub async fn cache_status(&self) -> Result<CacheStatus> {
        self.cache.status().await.map_err(AppError::internal)
    }

    async fn store(&self, key: &str, result: &TranslationResult) {
        match self.cache.put(key, result.clone()).await {
            Ok(()) => debug!(%key, "Cached haptic pattern result"),
            Err(e) => warn!(%key, "Failed to cache haptic pattern: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheError, InMemoryPatternCache};
    use crate::haptic::{CompileError, Instruction};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn service() -> (TranslationService, Arc<InMemoryPatternCache>) {
        let cache = Arc::new(InMemoryPatternCache::new());
        (TranslationService::new(cache.clone()), cache)
    }

    fn prefs(speed: f64, intensity: f64) -> PreferencesInput {
        PreferencesInput {
            speed: Some(speed),
            intensity: Some(intensity),
        }
    }

    /// Backend that fails every operation and counts calls.
    #[derive(Default)]
    struct UnreachableCache {
        calls: AtomicUsize,
    }

    impl UnreachableCache {
        fn fail<T>(&self) -> std::result::Result<T, CacheError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(CacheError::Unavailable("connection refused".to_string()))
        }
    }

    #[async_trait]
    impl PatternCache for UnreachableCache {
        async fn get(&self, _key: &str) -> std::result::Result<Option<TranslationResult>, CacheError> {
            self.fail()
        }

        async fn put(&self, _key: &str, _result: TranslationResult) -> std::result::Result<(), CacheError> {
            self.fail()
        }

        async fn clear(&self) -> std::result::Result<usize, CacheError> {
            self.fail()
        }

        async fn status(&self) -> std::result::Result<CacheStatus, CacheError> {
            self.fail()
        }
    }

    #[tokio::test]
    async fn test_translate_at_without_cache() {
        let (service, cache) = service();
        let translation = service
            .translate(Some("AT"), prefs(1.0, 0.8), false)
            .await
            .unwrap();

        assert!(!translation.cached);
        assert_eq!(translation.result.total_duration_ms, 900);
        assert_eq!(translation.result.character_count, 2);
        assert_eq!(
            translation.result.pattern,
            vec![
                Instruction::Vibrate { duration_ms: 100, intensity: 0.8 },
                Instruction::Vibrate { duration_ms: 300, intensity: 0.8 },
                Instruction::Pause { duration_ms: 200 },
                Instruction::Vibrate { duration_ms: 300, intensity: 0.8 },
            ]
        );
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_second_call_is_cached() {
        let (service, cache) = service();
        let first = service
            .translate(Some("Hello World"), PreferencesInput::default(), true)
            .await
            .unwrap();
        let second = service
            .translate(Some("Hello World"), PreferencesInput::default(), true)
            .await
            .unwrap();

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.result, second.result);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_cache_key_normalization_shares_entries() {
        let (service, cache) = service();
        service
            .translate(Some("sos"), prefs(1.0, 0.8), true)
            .await
            .unwrap();
        let hit = service
            .translate(Some("SOS"), prefs(1.000_000_1, 0.8), true)
            .await
            .unwrap();
        assert!(hit.cached);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_non_ascii_letters_do_not_hit_folded_entries() {
        let (service, cache) = service();
        for (stored, requested) in [("ASS", "Aß"), ("EI", "Eı")] {
            service
                .translate(Some(stored), PreferencesInput::default(), true)
                .await
                .unwrap();
            let translation = service
                .translate(Some(requested), PreferencesInput::default(), true)
                .await
                .unwrap();
            assert!(!translation.cached, "{requested:?}");
            assert_eq!(translation.result.character_count, 1, "{requested:?}");
            assert_eq!(translation.result.source_text, requested);
        }
        assert_eq!(cache.len(), 4);
    }

    #[tokio::test]
    async fn test_cached_result_matches_direct_compile_for_noisy_preferences() {
        let (service, _cache) = service();
        service
            .translate(Some("T"), prefs(1.0, 0.8), true)
            .await
            .unwrap();
        let cached = service
            .translate(Some("T"), prefs(1.004, 0.801), true)
            .await
            .unwrap();
        let direct = service
            .translate(Some("T"), prefs(1.004, 0.801), false)
            .await
            .unwrap();

        assert!(cached.cached);
        assert!(!direct.cached);
        assert_eq!(cached.result, direct.result);
        assert_eq!(
            direct.result.pattern,
            vec![Instruction::Vibrate { duration_ms: 300, intensity: 0.8 }]
        );
    }

    #[tokio::test]
    async fn test_uncached_calls_never_touch_cache() {
        let (service, cache) = service();
        service
            .translate(Some("E"), PreferencesInput::default(), true)
            .await
            .unwrap();
        let direct = service
            .translate(Some("E"), PreferencesInput::default(), false)
            .await
            .unwrap();
        assert!(!direct.cached);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_text() {
        let (service, cache) = service();
        for text in [None, Some(""), Some("   ")] {
            let err = service
                .translate(text, PreferencesInput::default(), true)
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::MissingText), "{text:?}");
        }
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_preferences_short_circuit() {
        let (service, cache) = service();
        let err = service
            .translate(Some("SOS"), prefs(0.05, 0.8), true)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidPreference(_)));
        assert!(err.to_string().contains("speed"));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_unencodable_text() {
        let (service, cache) = service();
        let err = service
            .translate(Some("###"), PreferencesInput::default(), true)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Compile(CompileError::NoEncodableCharacters)
        ));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_clear_and_status() {
        let (service, _cache) = service();
        for text in ["one", "two", "three"] {
            service
                .translate(Some(text), PreferencesInput::default(), true)
                .await
                .unwrap();
        }
        let status = service.cache_status().await.unwrap();
        assert_eq!(status.entries, 3);
        assert_eq!(status.keys.len(), 3);

        assert_eq!(service.clear_cache().await.unwrap(), 3);
        assert_eq!(service.cache_status().await.unwrap().entries, 0);
    }

    #[tokio::test]
    async fn test_unreachable_cache_degrades_to_compile() {
        let cache = Arc::new(UnreachableCache::default());
        let service = TranslationService::new(cache.clone());

        let translation = service
            .translate(Some("AT"), PreferencesInput::default(), true)
            .await
            .unwrap();
        assert!(!translation.cached);
        assert_eq!(translation.result.total_duration_ms, 900);
        // One failed lookup, one failed store.
        assert_eq!(cache.calls.load(Ordering::SeqCst), 2);

        assert!(matches!(
            service.clear_cache().await,
            Err(AppError::Internal { .. })
        ));
    }

    #[tokio::test]
    async fn test_serialized_shape() {
        let (service, _cache) = service();
        let translation = service
            .translate(Some("E"), PreferencesInput::default(), false)
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_value(&translation).unwrap(),
            serde_json::json!({
                "pattern": [{"type": "vibrate", "duration": 100, "intensity": 0.8}],
                "totalDuration": 100,
                "characterCount": 1,
                "text": "E",
                "cached": false,
            })
        );
    }
}
