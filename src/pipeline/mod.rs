//! Translation pipelines and the state the overlay reads.
//!
//! # Architecture
//!
//! ```text
//! CaptureController (input thread)
//!        │
//!        ├─ StartRegion(rect)   → RegionPipeline::run(rect)
//!        │                          capture → OCR text → normalize → translate
//!        │
//!        └─ TranslateWord(pos)  → WordPipeline::run(pos)
//!                                   capture square → OCR tokens → locate → translate
//!
//! ResultSink ── SharedDisplay (Arc<Mutex<DisplayState>>) ←── read by egui update()
//! ```
//!
//! Both pipelines run their blocking steps (screen capture, the OCR engine)
//! on tokio's blocking pool and always finish with a displayable result.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use screen_translate::capture::RegionCapturer;
//! use screen_translate::config::AppConfig;
//! use screen_translate::geometry::Point;
//! use screen_translate::ocr::{OcrAdapter, TesseractEngine};
//! use screen_translate::pipeline::WordPipeline;
//! use screen_translate::translate::{GoogleTranslator, TranslationAdapter};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let capturer = Arc::new(RegionCapturer::xcap());
//!     let ocr = OcrAdapter::new(Arc::new(TesseractEngine::from_config(&config.ocr)), "eng");
//!     let translator = TranslationAdapter::new(
//!         Arc::new(GoogleTranslator::from_config(&config.translate)),
//!         &config.translate,
//!     );
//!
//!     let words = WordPipeline::new(capturer, ocr, translator, &config.word);
//!     let outcome = words.run(Point::new(640, 360)).await;
//!     println!("{} → {}", outcome.original_word, outcome.translated_word);
//! }
//! ```

pub mod locator;
pub mod outcome;
pub mod region;
pub mod state;
pub mod word;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use locator::locate;
pub use outcome::{TranslationOutcome, WordError};
pub use region::{RegionPipeline, RegionResult};
pub use state::{
    format_region_result, format_word_outcome, new_shared_display, DisplayState, PipelineStage,
    ResultSink, SharedDisplay,
};
pub use word::WordPipeline;
