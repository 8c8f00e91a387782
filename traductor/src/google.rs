//! Google Translate API v2 backend.
//!
//! # Authentication
//!
//! The API key is read from the `GOOGLE_TRANSLATE_API_KEY` environment
//! variable. Obtain a key from: https://console.cloud.google.com/
//!
//! A missing key does not prevent construction; calls made without one
//! report a configuration error so the other backends keep working.
//!
//! # Example
//!
//! ```ignore
//! use traductor::{GoogleTranslator, TranslationProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GoogleTranslator::from_env()?;
//!     let result = provider.translate("Hello, world!", "en", "fr").await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use serde_json::json;

use crate::error::{TranslateError, TranslateResult};
use crate::provider::{TranslationProvider, http_client, read_json};

const PROVIDER_NAME: &str = "google";
const BASE_URL: &str = "https://translation.googleapis.com/language/translate/v2";

/// Google Translate API v2 provider.
///
/// Supports translation and source-language detection. This is the only
/// backend the service uses for detection.
#[derive(Clone)]
pub struct GoogleTranslator {
    api_key: Option<String>,
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslator {
    /// Create a provider with an explicit API key.
    ///
    /// `None` or a blank key produces a provider that fails each call with
    /// a configuration error instead of failing construction.
    pub fn new(api_key: Option<String>) -> TranslateResult<Self> {
        Ok(Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            client: http_client(PROVIDER_NAME)?,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Create a provider from the `GOOGLE_TRANSLATE_API_KEY` environment
    /// variable.
    pub fn from_env() -> TranslateResult<Self> {
        Self::new(std::env::var("GOOGLE_TRANSLATE_API_KEY").ok())
    }

    fn key(&self) -> TranslateResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            TranslateError::config(
                PROVIDER_NAME,
                "GOOGLE_TRANSLATE_API_KEY environment variable not set",
            )
        })
    }
}

impl std::fmt::Debug for GoogleTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslator")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> TranslateResult<String> {
        let key = self.key()?;
        let url = format!("{}?key={}", self.base_url, key);

        let mut body = json!({
            "q": [text],
            "target": target,
            "format": "text",
        });
        // The v2 API detects the source itself when the field is absent.
        if source != "auto" {
            body["source"] = json!(source);
        }

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                TranslateError::provider(PROVIDER_NAME, format!("request failed: {e}"))
            })?;

        let json = read_json(PROVIDER_NAME, response).await?;

        json["data"]["translations"][0]["translatedText"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                TranslateError::provider(
                    PROVIDER_NAME,
                    "invalid response: missing 'data.translations[0].translatedText'",
                )
            })
    }

    async fn detect_language(&self, text: &str) -> TranslateResult<String> {
        let key = self.key()?;
        let url = format!("{}/detect?key={}", self.base_url, key);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "q": [text] }))
            .send()
            .await
            .map_err(|e| {
                TranslateError::provider(PROVIDER_NAME, format!("request failed: {e}"))
            })?;

        let json = read_json(PROVIDER_NAME, response).await?;

        json["data"]["detections"][0][0]["language"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                TranslateError::provider(
                    PROVIDER_NAME,
                    "invalid response: missing 'data.detections[0][0].language'",
                )
            })
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
