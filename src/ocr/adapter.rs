//! Pipeline-facing wrapper around an [`OcrEngine`].
//!
//! Neither method returns an error: region mode turns a failure into
//! [`RecognizedText::Failed`] so it can be shown to the user, and word mode
//! treats a failure the same as "no words found".

use std::sync::Arc;

use image::RgbaImage;

use super::{OcrEngine, Token};

/// Region-mode OCR result.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognizedText {
    /// The engine's text (possibly empty).
    Text(String),
    /// The engine failed; carries the error detail.
    Failed(String),
}

impl RecognizedText {
    /// Text to display as the "original" side of a region result.
    pub fn display_text(&self) -> String {
        match self {
            RecognizedText::Text(text) => text.clone(),
            RecognizedText::Failed(detail) => format!("OCR Error: {detail}"),
        }
    }
}

/// `true` for tokens made only of ASCII letters.
///
/// ```
/// use screen_translate::ocr::is_word_like;
///
/// assert!(is_word_like("Hello"));
/// assert!(!is_word_like("it's"));
/// assert!(!is_word_like("42"));
/// assert!(!is_word_like(""));
/// ```
pub fn is_word_like(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_alphabetic())
}

/// Wraps an engine with the configured OCR language and word filter.
#[derive(Clone)]
pub struct OcrAdapter {
    engine: Arc<dyn OcrEngine>,
    language: String,
    min_len: usize,
    max_len: usize,
}

impl OcrAdapter {
    /// Adapter with the default word-length window of 2–50 characters.
    pub fn new(engine: Arc<dyn OcrEngine>, language: impl Into<String>) -> Self {
        Self {
            engine,
            language: language.into(),
            min_len: 2,
            max_len: 50,
        }
    }

    /// Override the accepted token length range (inclusive).
    pub fn with_word_len(mut self, min_len: usize, max_len: usize) -> Self {
        self.min_len = min_len;
        self.max_len = max_len;
        self
    }

    /// Region mode: flat text for the whole image.
    pub fn recognize_text(&self, image: &RgbaImage) -> RecognizedText {
        match self.engine.text_of(image, &self.language) {
            Ok(text) => RecognizedText::Text(text.trim().to_string()),
            Err(e) => {
                log::warn!("ocr: region recognition failed: {e}");
                RecognizedText::Failed(e.to_string())
            }
        }
    }

    /// Word mode: scored, word-shaped tokens in engine order.
    pub fn recognize_tokens(&self, image: &RgbaImage) -> Vec<Token> {
        let tokens = match self.engine.tokens_of(image, &self.language) {
            Ok(tokens) => tokens,
            Err(e) => {
                log::warn!("ocr: word recognition failed: {e}");
                return Vec::new();
            }
        };

        let total = tokens.len();
        let kept: Vec<Token> = tokens
            .into_iter()
            .filter(|t| t.confidence > 0.0)
            .filter(|t| {
                let len = t.text.chars().count();
                len >= self.min_len && len <= self.max_len && is_word_like(&t.text)
            })
            .collect();

        log::debug!("ocr: kept {} of {} tokens", kept.len(), total);
        kept
    }
}
