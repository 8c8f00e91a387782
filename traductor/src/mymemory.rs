//! MyMemory translation backend.
//!
//! MyMemory is a public translation memory with a keyless HTTP API, which
//! makes it the one backend that works out of the box. Setting
//! `MYMEMORY_EMAIL` to a contact address raises the anonymous daily quota.

use async_trait::async_trait;

use crate::error::{TranslateError, TranslateResult};
use crate::provider::{TranslationProvider, http_client, read_json};

const PROVIDER_NAME: &str = "mymemory";
const BASE_URL: &str = "https://api.mymemory.translated.net";

/// MyMemory translated.net provider.
#[derive(Debug, Clone)]
pub struct MyMemoryTranslator {
    email: Option<String>,
    client: reqwest::Client,
    base_url: String,
}

impl MyMemoryTranslator {
    /// Create a provider with an optional quota contact address.
    pub fn new(email: Option<String>) -> TranslateResult<Self> {
        Ok(Self {
            email: email.filter(|email| !email.trim().is_empty()),
            client: http_client(PROVIDER_NAME)?,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Create a provider from the `MYMEMORY_EMAIL` environment variable.
    pub fn from_env() -> TranslateResult<Self> {
        Self::new(std::env::var("MYMEMORY_EMAIL").ok())
    }
}

#[async_trait]
impl TranslationProvider for MyMemoryTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> TranslateResult<String> {
        // The langpair parameter needs two explicit codes; MyMemory has no
        // detection to fall back on.
        if source == "auto" {
            return Err(TranslateError::provider(
                PROVIDER_NAME,
                "source detection is not supported, pass an explicit source language",
            ));
        }
        let langpair = format!("{source}|{target}");

        let mut query = vec![("q", text), ("langpair", langpair.as_str())];
        if let Some(email) = &self.email {
            query.push(("de", email.as_str()));
        }

        let response = self
            .client
            .get(format!("{}/get", self.base_url))
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                TranslateError::provider(PROVIDER_NAME, format!("request failed: {e}"))
            })?;

        let json = read_json(PROVIDER_NAME, response).await?;

        // responseStatus is a number on success but a quoted string on some
        // failures.
        let status = json["responseStatus"]
            .as_i64()
            .or_else(|| {
                json["responseStatus"]
                    .as_str()
                    .and_then(|s| s.parse().ok())
            })
            .unwrap_or(0);
        if status != 200 {
            let details = json["responseDetails"].as_str().unwrap_or("unknown error");
            return Err(TranslateError::provider(
                PROVIDER_NAME,
                format!("status {status}: {details}"),
            ));
        }

        json["responseData"]["translatedText"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                TranslateError::provider(
                    PROVIDER_NAME,
                    "invalid response: missing 'responseData.translatedText'",
                )
            })
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
