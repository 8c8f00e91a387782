//! Mock translation provider for testing.
//!
//! A deterministic, API-free provider for exercising the dispatch, cache
//! and batch layers without API keys or network access. The CLI also uses
//! it behind the `--mock` flag.
//!
//! # Example
//!
//! ```ignore
//! use traductor::{MockMode, MockTranslator, TranslationProvider};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let result = mock.translate("hello", "en", "fr").await.unwrap();
//!     assert_eq!(result, "hello_fr");
//!     assert_eq!(mock.calls(), 1);
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{TranslateError, TranslateResult};
use crate::provider::TranslationProvider;

/// Mock translation modes for testing different scenarios.
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append the target language: "hello" → "hello_fr".
    Suffix,

    /// Use predefined mappings for realistic translations,
    /// (text, target) → translation. Unknown pairs fall back to suffixing.
    Mappings(HashMap<(String, String), String>),

    /// Simulate a provider failure with the given message.
    Error(String),

    /// No-op: return input unchanged.
    NoOp,
}

/// Mock provider that counts its invocations.
///
/// The counter is shared across clones, so a test can hand the provider to
/// a service, keep a handle, and assert how often the service actually
/// reached the provider. Cache hits never touch the counter.
#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
    calls: Arc<AtomicUsize>,
}

impl MockTranslator {
    /// Create a new MockTranslator with the given mode.
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times `translate` has been invoked, across all clones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn apply_translation(&self, text: &str, _source: &str, target: &str) -> TranslateResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{text}_{target}")),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{text}_{target}")))
            }
            MockMode::Error(msg) => Err(TranslateError::provider("mock", msg.clone())),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl TranslationProvider for MockTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> TranslateResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.apply_translation(text, source, target)
    }

    /// Claims every text is English, unless the mode simulates a failure.
    async fn detect_language(&self, _text: &str) -> TranslateResult<String> {
        match &self.mode {
            MockMode::Error(msg) => Err(TranslateError::provider("mock", msg.clone())),
            _ => Ok("en".to_string()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
