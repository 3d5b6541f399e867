//! Word-at-cursor translation.
//!
//! ```text
//! cursor ─▶ capture_square(cursor, capture_size)
//!        ─▶ recognize_tokens            (capture-local boxes)
//!        ─▶ offset_by(capture origin)   (screen-absolute boxes)
//!        ─▶ locate(tokens, cursor)
//!        ─▶ confidence gate
//!        ─▶ translate(word)
//! ```
//!
//! Every exit path yields a [`TranslationOutcome`]; failures carry a
//! [`WordError`] message.

use std::sync::Arc;

use crate::capture::RegionCapturer;
use crate::config::WordConfig;
use crate::geometry::{capture_square, Point, Rect};
use crate::ocr::{OcrAdapter, Token};
use crate::translate::{TranslationAdapter, TranslationResult};

use super::locator::locate;
use super::outcome::{TranslationOutcome, WordError};
use super::state::PipelineStage;

/// A failed attempt, with whatever was known about the word at that point.
struct Failure {
    error: WordError,
    word: Option<(String, f32, Point)>,
}

impl From<WordError> for Failure {
    fn from(error: WordError) -> Self {
        Self { error, word: None }
    }
}

/// Runs word translations. Cheap to clone; share one per application.
#[derive(Clone)]
pub struct WordPipeline {
    capturer: Arc<RegionCapturer>,
    ocr: OcrAdapter,
    translator: TranslationAdapter,
    capture_size: i32,
    min_confidence: f32,
}

impl WordPipeline {
    pub fn new(
        capturer: Arc<RegionCapturer>,
        ocr: OcrAdapter,
        translator: TranslationAdapter,
        config: &WordConfig,
    ) -> Self {
        Self {
            capturer,
            ocr,
            translator,
            capture_size: config.capture_size,
            min_confidence: config.min_confidence,
        }
    }

    /// Region captured for a cursor position.
    pub fn capture_region(&self, cursor: Point) -> Rect {
        capture_square(cursor, self.capture_size)
    }

    /// Translate the word under `cursor`.
    pub async fn run(&self, cursor: Point) -> TranslationOutcome {
        self.run_traced(cursor, |stage| {
            log::debug!("pipeline: word at {cursor} → {}", stage.label());
        })
        .await
    }

    /// Same as [`run`](Self::run), reporting every stage to `on_stage`.
    pub async fn run_traced<F>(&self, cursor: Point, mut on_stage: F) -> TranslationOutcome
    where
        F: FnMut(PipelineStage) + Send,
    {
        let outcome = match self.attempt(cursor, &mut on_stage).await {
            Ok(outcome) => outcome,
            Err(Failure { error, word }) => {
                log::info!("pipeline: word at {cursor}: {error}");
                match word {
                    Some((text, confidence, position)) => {
                        TranslationOutcome::failure_for_word(&error, text, confidence, position)
                    }
                    None => TranslationOutcome::failure(&error, cursor),
                }
            }
        };

        on_stage(PipelineStage::Done {
            success: outcome.success,
        });
        outcome
    }

    async fn attempt<F>(&self, cursor: Point, on_stage: &mut F) -> Result<TranslationOutcome, Failure>
    where
        F: FnMut(PipelineStage) + Send,
    {
        let region = self.capture_region(cursor);

        // ── 1. Capture (blocking → thread pool) ─────────────────────────
        on_stage(PipelineStage::Capturing);
        let capturer = Arc::clone(&self.capturer);
        let image = tokio::task::spawn_blocking(move || capturer.capture(region))
            .await
            .map_err(|e| WordError::Unexpected(e.to_string()))?
            .map_err(|e| WordError::Capture(e.to_string()))?;

        // ── 2. OCR (blocking → thread pool) ─────────────────────────────
        on_stage(PipelineStage::Recognizing);
        let ocr = self.ocr.clone();
        let tokens = tokio::task::spawn_blocking(move || ocr.recognize_tokens(&image))
            .await
            .map_err(|e| WordError::Unexpected(e.to_string()))?;

        if tokens.is_empty() {
            return Err(WordError::NoTokensDetected.into());
        }

        // ── 3. Locate in screen coordinates ─────────────────────────────
        on_stage(PipelineStage::Locating);
        let origin = region.origin();
        let tokens: Vec<Token> = tokens.into_iter().map(|t| t.offset_by(origin)).collect();
        let token = locate(&tokens, cursor).ok_or(WordError::NoWordNearCursor)?;
        let position = Point::new(token.x, token.y);

        if token.confidence < self.min_confidence {
            return Err(Failure {
                error: WordError::LowConfidence {
                    confidence: token.confidence,
                    threshold: self.min_confidence,
                },
                word: Some((token.text.clone(), token.confidence, position)),
            });
        }

        // ── 4. Translate ────────────────────────────────────────────────
        on_stage(PipelineStage::Translating);
        match self.translator.translate(&token.text).await {
            TranslationResult::Translated(translated) => Ok(TranslationOutcome::success(
                token.text.clone(),
                translated,
                token.confidence,
                position,
            )),
            TranslationResult::NoText => Err(WordError::NoWordNearCursor.into()),
            TranslationResult::Failed(detail) => Err(Failure {
                error: WordError::Translation(detail),
                word: Some((token.text.clone(), token.confidence, position)),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
