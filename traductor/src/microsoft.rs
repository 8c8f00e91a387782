//! Microsoft Translator API v3 backend.
//!
//! # Authentication
//!
//! The subscription key is read from `MICROSOFT_TRANSLATOR_API_KEY`. Keys
//! bound to a regional resource also need `MICROSOFT_TRANSLATOR_REGION`
//! (for example `westeurope`), sent as the `Ocp-Apim-Subscription-Region`
//! header. As with the other backends, a missing key fails the call, not
//! the construction.

use async_trait::async_trait;
use serde_json::json;

use crate::error::{TranslateError, TranslateResult};
use crate::provider::{TranslationProvider, http_client, read_json};

const PROVIDER_NAME: &str = "microsoft";
const BASE_URL: &str = "https://api.cognitive.microsofttranslator.com";

/// Microsoft Translator API v3 provider.
#[derive(Clone)]
pub struct MicrosoftTranslator {
    api_key: Option<String>,
    region: Option<String>,
    client: reqwest::Client,
    base_url: String,
}

impl MicrosoftTranslator {
    /// Create a provider with an explicit subscription key and optional
    /// resource region.
    pub fn new(api_key: Option<String>, region: Option<String>) -> TranslateResult<Self> {
        Ok(Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            region: region.filter(|region| !region.trim().is_empty()),
            client: http_client(PROVIDER_NAME)?,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Create a provider from `MICROSOFT_TRANSLATOR_API_KEY` and
    /// `MICROSOFT_TRANSLATOR_REGION`.
    pub fn from_env() -> TranslateResult<Self> {
        Self::new(
            std::env::var("MICROSOFT_TRANSLATOR_API_KEY").ok(),
            std::env::var("MICROSOFT_TRANSLATOR_REGION").ok(),
        )
    }

    fn key(&self) -> TranslateResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            TranslateError::config(
                PROVIDER_NAME,
                "MICROSOFT_TRANSLATOR_API_KEY environment variable not set",
            )
        })
    }
}

impl std::fmt::Debug for MicrosoftTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MicrosoftTranslator")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("region", &self.region)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TranslationProvider for MicrosoftTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> TranslateResult<String> {
        let key = self.key()?;

        let mut request = self
            .client
            .post(format!("{}/translate", self.base_url))
            .query(&[("api-version", "3.0"), ("to", target)])
            .header("Ocp-Apim-Subscription-Key", key)
            .json(&json!([{ "Text": text }]));
        // Omitting `from` asks the API to detect the source language.
        if source != "auto" {
            request = request.query(&[("from", source)]);
        }
        if let Some(region) = &self.region {
            request = request.header("Ocp-Apim-Subscription-Region", region);
        }

        let response = request.send().await.map_err(|e| {
            TranslateError::provider(PROVIDER_NAME, format!("request failed: {e}"))
        })?;

        let json = read_json(PROVIDER_NAME, response).await?;

        json[0]["translations"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                TranslateError::provider(
                    PROVIDER_NAME,
                    "invalid response: missing '[0].translations[0].text'",
                )
            })
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
