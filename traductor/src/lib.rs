//! Multi-backend text translation with memoized dispatch and batch
//! processing.
//!
//! # Overview
//!
//! The crate consists of a few components working together:
//!
//! 1. **Providers** - a [`TranslationProvider`] trait with Google,
//!    Microsoft and MyMemory implementations, plus an offline mock
//! 2. **Backend set** - named backend selection with a Google fallback for
//!    unrecognized names
//! 3. **Dispatcher** - [`TranslationService`], which validates input and
//!    memoizes successful translations in a bounded insertion-order cache
//! 4. **Batch coordinator** - ordered batch translation where one bad item
//!    never affects its siblings
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use traductor::{Backend, BackendSet, MockMode, MockTranslator, TranslationService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Offline set; use BackendSet::from_env() for the real providers.
//!     let backends = BackendSet::uniform(Arc::new(MockTranslator::new(MockMode::Suffix)));
//!     let service = TranslationService::new(backends);
//!
//!     let translated = service.translate("hello", "auto", "es", Backend::Google).await?;
//!     assert_eq!(translated, "hello_es");
//!
//!     // The repeat request is served from the cache.
//!     let again = service.translate("hello", "auto", "es", Backend::Google).await?;
//!     assert_eq!(again, translated);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod batch;
pub mod cache;
pub mod dispatcher;
pub mod error;
pub mod google;
pub mod languages;
pub mod microsoft;
pub mod mock;
pub mod mymemory;
pub mod provider;


pub use backend::{Backend, BackendSet};
pub use batch::{BatchItem, MAX_BATCH_SIZE};
pub use cache::{CacheKey, TranslationCache};
pub use dispatcher::{MAX_TEXT_LEN, TranslationService};
pub use error::{TranslateError, TranslateResult};
pub use google::GoogleTranslator;
pub use languages::{SUPPORTED_LANGUAGES, language_name};
pub use microsoft::MicrosoftTranslator;
pub use mock::{MockMode, MockTranslator};
pub use mymemory::MyMemoryTranslator;
pub use provider::TranslationProvider;
