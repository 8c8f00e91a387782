//! Error types shared across validation, dispatch and the provider boundary.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type TranslateResult<T> = Result<T, TranslateError>;

/// Everything that can go wrong between accepting a request and returning
/// a translation.
///
/// Input problems (`EmptyText`, `TextTooLong`, `EmptyBatch`, `TooManyTexts`)
/// are caught before any cache lookup or network call. `Config` and
/// `Provider` surface from the backend itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The request text was empty or whitespace-only.
    #[error("Text is required")]
    EmptyText,

    /// The trimmed request text exceeded the per-call character cap.
    #[error("Text too long (max {max} characters)")]
    TextTooLong { len: usize, max: usize },

    /// A batch request arrived with no texts at all.
    #[error("Texts array is required")]
    EmptyBatch,

    /// A batch request carried more texts than one call may process.
    #[error("Too many texts (max {max})")]
    TooManyTexts { count: usize, max: usize },

    /// The selected backend is missing credentials or other local setup.
    #[error("{provider} is not configured: {message}")]
    Config { provider: String, message: String },

    /// The backend call itself failed: transport error, non-success HTTP
    /// status or an unparseable response body.
    #[error("{provider}: {message}")]
    Provider { provider: String, message: String },
}

impl TranslateError {
    /// Build a [`TranslateError::Config`] for the named provider.
    pub fn config(provider: impl Into<String>, message: impl Into<String>) -> Self {
        TranslateError::Config {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Build a [`TranslateError::Provider`] for the named provider.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        TranslateError::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// True for errors caused by the caller's input rather than by a
    /// backend. The HTTP layer maps these to 400 responses.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            TranslateError::EmptyText
                | TranslateError::TextTooLong { .. }
                | TranslateError::EmptyBatch
                | TranslateError::TooManyTexts { .. }
        )
    }
}
