//! Region translation: capture → OCR → normalize → translate → normalize.
//!
//! Every path ends in a [`RegionResult`] that can go straight to the
//! display. OCR failure does not abort the run: its error text becomes the
//! "original" side and translation is skipped.

use std::sync::Arc;

use crate::capture::{CaptureError, RegionCapturer};
use crate::geometry::Rect;
use crate::ocr::{OcrAdapter, RecognizedText};
use crate::text::normalize;
use crate::translate::{TranslationAdapter, TranslationResult, NO_TEXT_DETECTED};

use super::state::PipelineStage;

/// Original and translated text of one region run, both normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionResult {
    pub original: String,
    pub translated: String,
}

impl RegionResult {
    fn new(original: impl Into<String>, translated: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translated: translated.into(),
        }
    }

    fn invalid_region() -> Self {
        Self::new("Invalid coordinates", "Please select a valid region")
    }

    fn capture_failed() -> Self {
        Self::new("Capture failed", "Could not capture screen region")
    }
}

/// Runs region translations. Cheap to clone; share one per application.
#[derive(Clone)]
pub struct RegionPipeline {
    capturer: Arc<RegionCapturer>,
    ocr: OcrAdapter,
    translator: TranslationAdapter,
}

impl RegionPipeline {
    pub fn new(capturer: Arc<RegionCapturer>, ocr: OcrAdapter, translator: TranslationAdapter) -> Self {
        Self {
            capturer,
            ocr,
            translator,
        }
    }

    /// Translate the text inside `rect`.
    pub async fn run(&self, rect: Rect) -> RegionResult {
        self.run_traced(rect, |stage| {
            log::debug!("pipeline: region {rect} → {}", stage.label());
        })
        .await
    }

    /// Same as [`run`](Self::run), reporting every stage to `on_stage`.
    pub async fn run_traced<F>(&self, rect: Rect, mut on_stage: F) -> RegionResult
    where
        F: FnMut(PipelineStage) + Send,
    {
        if !rect.is_valid() {
            log::warn!("pipeline: rejected region {rect}");
            on_stage(PipelineStage::Done { success: false });
            return RegionResult::invalid_region();
        }

        // ── 1. Capture (blocking → thread pool) ─────────────────────────
        on_stage(PipelineStage::Capturing);
        let capturer = Arc::clone(&self.capturer);
        let image = match tokio::task::spawn_blocking(move || capturer.capture(rect)).await {
            Ok(Ok(image)) => image,
            Ok(Err(CaptureError::InvalidRegion(_))) => {
                on_stage(PipelineStage::Done { success: false });
                return RegionResult::invalid_region();
            }
            Ok(Err(e)) => {
                log::warn!("pipeline: region capture failed: {e}");
                on_stage(PipelineStage::Done { success: false });
                return RegionResult::capture_failed();
            }
            Err(e) => {
                log::error!("pipeline: capture task panicked: {e}");
                on_stage(PipelineStage::Done { success: false });
                return RegionResult::new("Unexpected error", e.to_string());
            }
        };

        // ── 2. OCR (blocking → thread pool) ─────────────────────────────
        on_stage(PipelineStage::Recognizing);
        let ocr = self.ocr.clone();
        let recognized = tokio::task::spawn_blocking(move || ocr.recognize_text(&image))
            .await
            .unwrap_or_else(|e| RecognizedText::Failed(e.to_string()));

        let original = normalize(&recognized.display_text());

        // ── 3. Translate ────────────────────────────────────────────────
        let translated = match recognized {
            RecognizedText::Text(_) if !original.is_empty() => {
                on_stage(PipelineStage::Translating);
                self.translator.translate(&original).await
            }
            _ => TranslationResult::NoText,
        };

        let success = matches!(translated, TranslationResult::Translated(_));
        let translated = match translated {
            TranslationResult::NoText => NO_TEXT_DETECTED.to_string(),
            other => normalize(&other.display_text()),
        };

        on_stage(PipelineStage::Done { success });
        RegionResult::new(original, translated)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
