//! Terminal results of the word-translation pipeline.

use thiserror::Error;

use crate::geometry::Point;

// ---------------------------------------------------------------------------
// WordError
// ---------------------------------------------------------------------------

/// Every way a word-translation attempt can end without a translation.
///
/// The `Display` text is what the overlay shows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WordError {
    #[error("Capture failed: {0}")]
    Capture(String),

    #[error("No words detected near cursor")]
    NoTokensDetected,

    #[error("No word found at cursor")]
    NoWordNearCursor,

    #[error("Low confidence ({confidence:.0} < {threshold:.0})")]
    LowConfidence { confidence: f32, threshold: f32 },

    #[error("Translation failed: {0}")]
    Translation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

// ---------------------------------------------------------------------------
// TranslationOutcome
// ---------------------------------------------------------------------------

/// Result of one word-translation attempt. Built once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationOutcome {
    pub original_word: String,
    pub translated_word: String,
    pub confidence: f32,
    /// Screen position of the word (its box's top-left), or the cursor when
    /// no word was selected.
    pub position: Point,
    pub success: bool,
    pub error_message: Option<String>,
}

impl TranslationOutcome {
    pub fn success(
        original_word: impl Into<String>,
        translated_word: impl Into<String>,
        confidence: f32,
        position: Point,
    ) -> Self {
        Self {
            original_word: original_word.into(),
            translated_word: translated_word.into(),
            confidence,
            position,
            success: true,
            error_message: None,
        }
    }

    /// A failure that never got as far as selecting a word.
    pub fn failure(error: &WordError, position: Point) -> Self {
        Self::failure_for_word(error, "", 0.0, position)
    }

    /// A failure after a word was selected (low confidence, translation).
    pub fn failure_for_word(
        error: &WordError,
        original_word: impl Into<String>,
        confidence: f32,
        position: Point,
    ) -> Self {
        Self {
            original_word: original_word.into(),
            translated_word: String::new(),
            confidence,
            position,
            success: false,
            error_message: Some(error.to_string()),
        }
    }
}
