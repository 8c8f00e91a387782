//! Translation provider abstraction.
//!
//! The [`TranslationProvider`] trait decouples dispatch and caching from any
//! concrete backend, so Google, Microsoft, MyMemory and the offline mock are
//! interchangeable behind one interface.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{TranslateError, TranslateResult};

/// Shared request timeout for every provider client.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Interface implemented by every translation backend.
///
/// Language codes are opaque at this layer: they are passed through to the
/// provider untouched. `"auto"` as a source language asks the provider to
/// detect the source itself. Callers are expected to hand in non-empty,
/// already validated text.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate `text` from `source` to `target`.
    async fn translate(&self, text: &str, source: &str, target: &str) -> TranslateResult<String>;

    /// Identify the language `text` is written in, as a language code.
    ///
    /// Backends without a detection endpoint keep this default and report
    /// a provider error.
    async fn detect_language(&self, text: &str) -> TranslateResult<String> {
        let _ = text;
        Err(TranslateError::provider(
            self.name(),
            "language detection is not supported",
        ))
    }

    /// Short lowercase provider name, used in logs and error messages.
    fn name(&self) -> &'static str;
}

/// Build the HTTP client every provider uses.
pub(crate) fn http_client(provider: &'static str) -> TranslateResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| {
            TranslateError::provider(provider, format!("failed to build HTTP client: {e}"))
        })
}

/// Read a provider response as JSON, turning non-success HTTP statuses and
/// unparseable bodies into provider errors.
pub(crate) async fn read_json(
    provider: &'static str,
    response: reqwest::Response,
) -> TranslateResult<serde_json::Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(TranslateError::provider(
            provider,
            format!("HTTP {status}: {body}"),
        ));
    }

    response.json().await.map_err(|e| {
        TranslateError::provider(provider, format!("invalid response body: {e}"))
    })
}
