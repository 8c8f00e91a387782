//! Batch translation with per-item error isolation.

use serde::Serialize;

use crate::backend::Backend;
use crate::dispatcher::{MAX_TEXT_LEN, TranslationService};
use crate::error::{TranslateError, TranslateResult};

/// Maximum number of texts accepted in one batch call.
pub const MAX_BATCH_SIZE: usize = 100;

/// Outcome of one batch entry, aligned with the request order by `index`.
///
/// Exactly one of `translated_text` and `error` is meaningful: a failed
/// item carries its message in `error` and an empty `translated_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchItem {
    pub index: usize,
    pub original_text: String,
    pub translated_text: String,
    pub error: Option<String>,
}

impl BatchItem {
    fn translated(index: usize, original: &str, translated: String) -> Self {
        Self {
            index,
            original_text: original.to_string(),
            translated_text: translated,
            error: None,
        }
    }

    fn failed(index: usize, original: &str, error: impl Into<String>) -> Self {
        Self {
            index,
            original_text: original.to_string(),
            translated_text: String::new(),
            error: Some(error.into()),
        }
    }
}

impl TranslationService {
    /// Translate an ordered list of texts, isolating per-item failures.
    ///
    /// Structural problems fail the whole batch before any item is touched:
    /// an empty list or more than [`MAX_BATCH_SIZE`] texts. After that each
    /// item is processed sequentially in index order and failures stay in
    /// their slot; a bad or untranslatable text never affects its siblings.
    /// Items go through the same memo cache as single translations.
    pub async fn translate_batch(
        &self,
        texts: &[String],
        source: &str,
        target: &str,
        backend: Backend,
    ) -> TranslateResult<Vec<BatchItem>> {
        if texts.is_empty() {
            return Err(TranslateError::EmptyBatch);
        }
        if texts.len() > MAX_BATCH_SIZE {
            return Err(TranslateError::TooManyTexts {
                count: texts.len(),
                max: MAX_BATCH_SIZE,
            });
        }

        let mut items = Vec::with_capacity(texts.len());
        for (index, text) in texts.iter().enumerate() {
            let trimmed = text.trim();
            let item = if trimmed.is_empty() {
                BatchItem::failed(index, text, "Invalid text")
            } else if trimmed.chars().count() > MAX_TEXT_LEN {
                BatchItem::failed(index, text, "Text too long")
            } else {
                match self.translate(text, source, target, backend).await {
                    Ok(translated) => BatchItem::translated(index, text, translated),
                    Err(err) => BatchItem::failed(index, text, err.to_string()),
                }
            };
            items.push(item);
        }
        Ok(items)
    }
}
