//! Memoized dispatch from validated requests to translation backends.

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::backend::{Backend, BackendSet};
use crate::cache::{CacheKey, TranslationCache};
use crate::error::{TranslateError, TranslateResult};

/// Maximum characters accepted per text, counted after trimming.
pub const MAX_TEXT_LEN: usize = 5000;

/// Characters of request text included in log lines.
const LOG_PREVIEW_CHARS: usize = 50;

/// Translation front door.
///
/// Validates input, consults the memo cache and falls through to the
/// selected backend on a miss. Only successful translations are cached, so
/// a failed key is retried in full on its next request. The cache lives
/// behind a plain mutex that is never held across an await point.
pub struct TranslationService {
    backends: BackendSet,
    cache: Mutex<TranslationCache>,
}

impl TranslationService {
    /// Service with the default cache capacity of
    /// [`TranslationCache::DEFAULT_CAPACITY`] entries.
    pub fn new(backends: BackendSet) -> Self {
        Self::with_capacity(backends, TranslationCache::DEFAULT_CAPACITY)
    }

    /// Service with an explicit cache capacity. Tests use small bounds to
    /// exercise eviction.
    pub fn with_capacity(backends: BackendSet, capacity: usize) -> Self {
        Self {
            backends,
            cache: Mutex::new(TranslationCache::new(capacity)),
        }
    }

    /// Translate `text` from `source` to `target` via `backend`, reusing
    /// the cached result when one exists.
    pub async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
        backend: Backend,
    ) -> TranslateResult<String> {
        let text = validate_text(text)?;
        let key = CacheKey::new(text, source, target, backend);

        if let Some(hit) = self.lookup(&key) {
            debug!(backend = %backend, "cache hit for '{}'", preview(text));
            return Ok(hit);
        }

        info!(
            source,
            target,
            backend = %backend,
            "translating '{}'",
            preview(text)
        );

        match self
            .backends
            .get(backend)
            .translate(text, source.trim(), target.trim())
            .await
        {
            Ok(translated) => {
                self.store(key, translated.clone());
                Ok(translated)
            }
            Err(err) => {
                warn!(backend = %backend, error = %err, "translation failed");
                Err(err)
            }
        }
    }

    /// Identify the language of `text`.
    ///
    /// Detection always goes through the Google backend regardless of what
    /// a request selected elsewhere, and results are not cached.
    pub async fn detect_language(&self, text: &str) -> TranslateResult<String> {
        let text = validate_text(text)?;
        self.backends
            .get(Backend::Google)
            .detect_language(text)
            .await
    }

    /// Number of translations currently cached.
    pub fn cached_entries(&self) -> usize {
        self.lock().len()
    }

    fn lookup(&self, key: &CacheKey) -> Option<String> {
        self.lock().get(key).map(str::to_string)
    }

    fn store(&self, key: CacheKey, translated: String) {
        self.lock().insert(key, translated);
    }

    fn lock(&self) -> MutexGuard<'_, TranslationCache> {
        // Keep serving if a previous holder panicked mid-insert.
        match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Trim and bounds-check request text. Runs before any cache lookup or
/// provider call.
pub(crate) fn validate_text(text: &str) -> TranslateResult<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TranslateError::EmptyText);
    }
    let len = trimmed.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(TranslateError::TextTooLong {
            len,
            max: MAX_TEXT_LEN,
        });
    }
    Ok(trimmed)
}

fn preview(text: &str) -> String {
    if text.chars().count() <= LOG_PREVIEW_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(LOG_PREVIEW_CHARS).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::mock::{MockMode, MockTranslator};
    use crate::provider::TranslationProvider;

    fn suffix_service(capacity: usize) -> (TranslationService, MockTranslator) {
        let mock = MockTranslator::new(MockMode::Suffix);
        let service = TranslationService::with_capacity(
            BackendSet::uniform(Arc::new(mock.clone())),
            capacity,
        );
        (service, mock)
    }

    // ========== Validation Tests ==========

    #[test]
    fn test_validate_trims_text() {
        assert_eq!(validate_text("  hello  ").unwrap(), "hello");
    }

    #[test]
    fn test_validate_rejects_empty_text() {
        assert_eq!(validate_text("").unwrap_err(), TranslateError::EmptyText);
        assert_eq!(validate_text("   ").unwrap_err(), TranslateError::EmptyText);
        assert_eq!(validate_text("\n\t").unwrap_err(), TranslateError::EmptyText);
    }

    #[test]
    fn test_validate_rejects_text_over_cap() {
        let text = "x".repeat(MAX_TEXT_LEN + 1);
        assert_eq!(
            validate_text(&text).unwrap_err(),
            TranslateError::TextTooLong {
                len: MAX_TEXT_LEN + 1,
                max: MAX_TEXT_LEN
            }
        );
    }

    #[test]
    fn test_validate_accepts_text_at_cap() {
        let text = "x".repeat(MAX_TEXT_LEN);
        assert!(validate_text(&text).is_ok());
    }

    #[test]
    fn test_validate_counts_chars_not_bytes() {
        // 5000 three-byte characters are within the cap.
        let text = "翻".repeat(MAX_TEXT_LEN);
        assert!(validate_text(&text).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_the_provider() {
        let (service, mock) = suffix_service(10);

        let err = service.translate("", "auto", "es", Backend::Google).await;
        assert_eq!(err.unwrap_err(), TranslateError::EmptyText);

        let long = "x".repeat(MAX_TEXT_LEN + 1);
        let err = service.translate(&long, "auto", "es", Backend::Google).await;
        assert!(matches!(
            err.unwrap_err(),
            TranslateError::TextTooLong { .. }
        ));

        assert_eq!(mock.calls(), 0);
        assert_eq!(service.cached_entries(), 0);
    }

    // ========== Memoization Tests ==========

    #[tokio::test]
    async fn test_repeat_requests_hit_the_cache() {
        let (service, mock) = suffix_service(10);

        let first = service
            .translate("hello", "auto", "es", Backend::Google)
            .await
            .unwrap();
        let second = service
            .translate("hello", "auto", "es", Backend::Google)
            .await
            .unwrap();

        assert_eq!(first, "hello_es");
        assert_eq!(second, first);
        assert_eq!(mock.calls(), 1);
        assert_eq!(service.cached_entries(), 1);
    }

    #[tokio::test]
    async fn test_whitespace_variants_share_an_entry() {
        let (service, mock) = suffix_service(10);

        service
            .translate("hello", "auto", "es", Backend::Google)
            .await
            .unwrap();
        service
            .translate("  hello  ", "auto", "es", Backend::Google)
            .await
            .unwrap();

        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_backend_is_part_of_the_key() {
        let (service, mock) = suffix_service(10);

        service
            .translate("hello", "auto", "es", Backend::Google)
            .await
            .unwrap();
        service
            .translate("hello", "auto", "es", Backend::MyMemory)
            .await
            .unwrap();

        assert_eq!(mock.calls(), 2);
        assert_eq!(service.cached_entries(), 2);
    }

    #[tokio::test]
    async fn test_language_pair_is_part_of_the_key() {
        let (service, mock) = suffix_service(10);

        service
            .translate("hello", "auto", "es", Backend::Google)
            .await
            .unwrap();
        service
            .translate("hello", "auto", "de", Backend::Google)
            .await
            .unwrap();
        service
            .translate("hello", "en", "es", Backend::Google)
            .await
            .unwrap();

        assert_eq!(mock.calls(), 3);
    }

    // ========== Failure Caching Tests ==========

    #[tokio::test]
    async fn test_failures_are_never_cached() {
        let mock = MockTranslator::new(MockMode::Error("outage".to_string()));
        let service =
            TranslationService::with_capacity(BackendSet::uniform(Arc::new(mock.clone())), 10);

        for _ in 0..2 {
            let err = service
                .translate("hello", "auto", "es", Backend::Google)
                .await
                .unwrap_err();
            assert!(matches!(err, TranslateError::Provider { .. }));
        }

        // Both attempts reached the provider; nothing was cached.
        assert_eq!(mock.calls(), 2);
        assert_eq!(service.cached_entries(), 0);
    }

    /// Fails a fixed number of times, then behaves like the suffix mock.
    struct FlakyTranslator {
        failures_left: AtomicUsize,
        calls: AtomicUsize,
    }

    impl FlakyTranslator {
        fn new(failures: usize) -> Self {
            Self {
                failures_left: AtomicUsize::new(failures),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TranslationProvider for FlakyTranslator {
        async fn translate(
            &self,
            text: &str,
            _source: &str,
            target: &str,
        ) -> TranslateResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failures_left.load(Ordering::SeqCst) > 0 {
                self.failures_left.fetch_sub(1, Ordering::SeqCst);
                return Err(TranslateError::provider("flaky", "transient outage"));
            }
            Ok(format!("{text}_{target}"))
        }

        fn name(&self) -> &'static str {
            "flaky"
        }
    }

    #[tokio::test]
    async fn test_key_is_retried_until_it_succeeds() {
        let flaky = Arc::new(FlakyTranslator::new(1));
        let service =
            TranslationService::with_capacity(BackendSet::uniform(flaky.clone()), 10);

        let err = service.translate("hello", "auto", "es", Backend::Google).await;
        assert!(err.is_err());
        assert_eq!(service.cached_entries(), 0);

        let ok = service
            .translate("hello", "auto", "es", Backend::Google)
            .await
            .unwrap();
        assert_eq!(ok, "hello_es");
        assert_eq!(service.cached_entries(), 1);

        // Third request is served from the cache.
        service
            .translate("hello", "auto", "es", Backend::Google)
            .await
            .unwrap();
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 2);
    }

    // ========== Eviction Tests ==========

    #[tokio::test]
    async fn test_cache_respects_capacity_in_insertion_order() {
        let (service, mock) = suffix_service(2);

        for text in ["a", "b", "c"] {
            service
                .translate(text, "auto", "es", Backend::Google)
                .await
                .unwrap();
        }
        assert_eq!(mock.calls(), 3);
        assert_eq!(service.cached_entries(), 2);

        // "a" was the oldest insertion and must be gone; "c" is cached.
        service
            .translate("c", "auto", "es", Backend::Google)
            .await
            .unwrap();
        assert_eq!(mock.calls(), 3);

        service
            .translate("a", "auto", "es", Backend::Google)
            .await
            .unwrap();
        assert_eq!(mock.calls(), 4);
    }

    // ========== Routing Tests ==========

    #[tokio::test]
    async fn test_each_backend_uses_its_own_provider() {
        let google = MockTranslator::new(MockMode::NoOp);
        let microsoft = MockTranslator::new(MockMode::Suffix);
        let mymemory = MockTranslator::new(MockMode::Error("down".to_string()));
        let service = TranslationService::new(BackendSet::new(
            Arc::new(google.clone()),
            Arc::new(microsoft.clone()),
            Arc::new(mymemory.clone()),
        ));

        assert_eq!(
            service
                .translate("hi", "auto", "es", Backend::Microsoft)
                .await
                .unwrap(),
            "hi_es"
        );
        assert!(
            service
                .translate("hi", "auto", "es", Backend::MyMemory)
                .await
                .is_err()
        );
        assert_eq!(
            service
                .translate("hi", "auto", "es", Backend::Google)
                .await
                .unwrap(),
            "hi"
        );

        assert_eq!(google.calls(), 1);
        assert_eq!(microsoft.calls(), 1);
        assert_eq!(mymemory.calls(), 1);
    }

    #[tokio::test]
    async fn test_unrecognized_backend_name_routes_to_google() {
        let google = MockTranslator::new(MockMode::NoOp);
        let others = MockTranslator::new(MockMode::Error("wrong backend".to_string()));
        let service = TranslationService::new(BackendSet::new(
            Arc::new(google.clone()),
            Arc::new(others.clone()),
            Arc::new(others.clone()),
        ));

        let backend = Backend::from_name("unknown-provider");
        let result = service.translate("hi", "auto", "es", backend).await.unwrap();

        assert_eq!(result, "hi");
        assert_eq!(google.calls(), 1);
        assert_eq!(others.calls(), 0);
    }

    // ========== Detection Tests ==========

    #[tokio::test]
    async fn test_detection_goes_through_google() {
        let google = MockTranslator::new(MockMode::NoOp);
        let others = MockTranslator::new(MockMode::Error("wrong backend".to_string()));
        let service = TranslationService::new(BackendSet::new(
            Arc::new(google.clone()),
            Arc::new(others.clone()),
            Arc::new(others),
        ));

        assert_eq!(service.detect_language("hola mundo").await.unwrap(), "en");
    }

    #[tokio::test]
    async fn test_detection_validates_text() {
        let (service, mock) = suffix_service(10);
        assert_eq!(
            service.detect_language("  ").await.unwrap_err(),
            TranslateError::EmptyText
        );
        assert_eq!(mock.calls(), 0);
    }
}
