//! Named translation backends and the set that resolves them to providers.

use std::fmt;
use std::sync::Arc;

use crate::error::TranslateResult;
use crate::google::GoogleTranslator;
use crate::microsoft::MicrosoftTranslator;
use crate::mymemory::MyMemoryTranslator;
use crate::provider::TranslationProvider;

/// The closed set of backends a request may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    #[default]
    Google,
    Microsoft,
    MyMemory,
}

impl Backend {
    /// All known backends, in the order requests are documented.
    pub const ALL: [Backend; 3] = [Backend::Google, Backend::Microsoft, Backend::MyMemory];

    /// Resolve a backend from its request-level name.
    ///
    /// Matching ignores case and surrounding whitespace. Unrecognized names
    /// resolve to [`Backend::Google`] instead of failing, so a misspelled
    /// service name still produces a translation.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "google" => Backend::Google,
            "microsoft" => Backend::Microsoft,
            "mymemory" => Backend::MyMemory,
            _ => Backend::default(),
        }
    }

    /// Canonical lowercase name, used in cache keys and responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Google => "google",
            Backend::Microsoft => "microsoft",
            Backend::MyMemory => "mymemory",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One provider per backend, picked at dispatch time.
///
/// Adding a backend means a new [`Backend`] variant and a slot here; the
/// dispatcher and the batch coordinator stay untouched.
#[derive(Clone)]
pub struct BackendSet {
    google: Arc<dyn TranslationProvider>,
    microsoft: Arc<dyn TranslationProvider>,
    mymemory: Arc<dyn TranslationProvider>,
}

impl BackendSet {
    pub fn new(
        google: Arc<dyn TranslationProvider>,
        microsoft: Arc<dyn TranslationProvider>,
        mymemory: Arc<dyn TranslationProvider>,
    ) -> Self {
        Self {
            google,
            microsoft,
            mymemory,
        }
    }

    /// Build the production set, reading credentials from the environment.
    ///
    /// Missing credentials do not fail here; the affected backend reports a
    /// configuration error when it is actually called, and the others keep
    /// working.
    pub fn from_env() -> TranslateResult<Self> {
        Ok(Self::new(
            Arc::new(GoogleTranslator::from_env()?),
            Arc::new(MicrosoftTranslator::from_env()?),
            Arc::new(MyMemoryTranslator::from_env()?),
        ))
    }

    /// Use the same provider for every backend. Test setups rely on this.
    pub fn uniform(provider: Arc<dyn TranslationProvider>) -> Self {
        Self::new(provider.clone(), provider.clone(), provider)
    }

    /// The provider registered for `backend`.
    pub fn get(&self, backend: Backend) -> &dyn TranslationProvider {
        match backend {
            Backend::Google => self.google.as_ref(),
            Backend::Microsoft => self.microsoft.as_ref(),
            Backend::MyMemory => self.mymemory.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockMode, MockTranslator};

    #[test]
    fn test_known_names_resolve() {
        assert_eq!(Backend::from_name("google"), Backend::Google);
        assert_eq!(Backend::from_name("microsoft"), Backend::Microsoft);
        assert_eq!(Backend::from_name("mymemory"), Backend::MyMemory);
    }

    #[test]
    fn test_names_are_case_and_whitespace_insensitive() {
        assert_eq!(Backend::from_name("Google"), Backend::Google);
        assert_eq!(Backend::from_name("MICROSOFT"), Backend::Microsoft);
        assert_eq!(Backend::from_name("  mymemory  "), Backend::MyMemory);
    }

    #[test]
    fn test_unknown_names_fall_back_to_google() {
        assert_eq!(Backend::from_name("deepl"), Backend::Google);
        assert_eq!(Backend::from_name(""), Backend::Google);
        assert_eq!(Backend::from_name("unknown-provider"), Backend::Google);
    }

    #[test]
    fn test_canonical_names_round_trip() {
        for backend in Backend::ALL {
            assert_eq!(Backend::from_name(backend.as_str()), backend);
            assert_eq!(backend.to_string(), backend.as_str());
        }
    }

    #[test]
    fn test_uniform_set_serves_every_backend() {
        let set = BackendSet::uniform(std::sync::Arc::new(MockTranslator::new(MockMode::Suffix)));
        for backend in Backend::ALL {
            assert_eq!(set.get(backend).name(), "mock");
        }
    }
}
