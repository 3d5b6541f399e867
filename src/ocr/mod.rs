//! Optical character recognition.
//!
//! * [`OcrEngine`]: the black-box engine interface (flat text, or words with
//!   boxes and confidences).
//! * [`TesseractEngine`]: runs the `tesseract` executable on a temporary PNG.
//! * [`OcrAdapter`]: what the pipelines call: turns engine errors into
//!   displayable text (region mode) or an empty list (word mode), and applies
//!   the word-shape filter.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use screen_translate::config::OcrConfig;
//! use screen_translate::ocr::{OcrAdapter, TesseractEngine};
//!
//! let config = OcrConfig::default();
//! let adapter = OcrAdapter::new(Arc::new(TesseractEngine::from_config(&config)), "eng");
//! let image = image::RgbaImage::new(400, 400);
//! for token in adapter.recognize_tokens(&image) {
//!     println!("{} @ ({}, {}) conf={}", token.text, token.x, token.y, token.confidence);
//! }
//! ```

pub mod adapter;
pub mod tesseract;

pub use adapter::{is_word_like, OcrAdapter, RecognizedText};
pub use tesseract::{parse_tsv, TesseractEngine};

use image::RgbaImage;
use thiserror::Error;

use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// One OCR-detected word with its bounding box.
///
/// Coordinates are relative to the image handed to the engine until
/// [`Token::offset_by`] moves them into screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Engine confidence, 0–100.
    pub confidence: f32,
}

impl Token {
    pub fn new(text: impl Into<String>, x: i32, y: i32, width: i32, height: i32, confidence: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            height,
            confidence,
        }
    }

    /// Center of the bounding box, in fractional pixels.
    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.x) + f64::from(self.width) / 2.0,
            f64::from(self.y) + f64::from(self.height) / 2.0,
        )
    }

    /// `true` when `p` lies inside the box, edges included.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Translate the box by `origin` (capture-local → screen-absolute).
    pub fn offset_by(mut self, origin: Point) -> Self {
        self.x += origin.x;
        self.y += origin.y;
        self
    }
}

// ---------------------------------------------------------------------------
// OcrError
// ---------------------------------------------------------------------------

/// Errors reported by an [`OcrEngine`].
#[derive(Debug, Error)]
pub enum OcrError {
    /// The image could not be handed to the engine.
    #[error("cannot prepare image: {0}")]
    Image(String),

    /// The engine process could not be started.
    #[error("cannot run OCR engine: {0}")]
    Spawn(#[from] std::io::Error),

    /// The engine ran but reported failure.
    #[error("OCR engine failed: {0}")]
    Engine(String),
}

// ---------------------------------------------------------------------------
// OcrEngine trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe OCR engine interface.
///
/// Both methods block; call them from `spawn_blocking`.
pub trait OcrEngine: Send + Sync {
    /// Best-effort flat text for the whole image.
    fn text_of(&self, image: &RgbaImage, lang: &str) -> Result<String, OcrError>;

    /// Every recognised word with its box and confidence, unfiltered.
    fn tokens_of(&self, image: &RgbaImage, lang: &str) -> Result<Vec<Token>, OcrError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_odd_sized_box_is_fractional() {
        let t = Token::new("word", 10, 20, 5, 3, 90.0);
        assert_eq!(t.center(), (12.5, 21.5));
    }

    #[test]
    fn contains_includes_edges() {
        let t = Token::new("word", 10, 10, 20, 10, 90.0);
        assert!(t.contains(Point::new(10, 10)));
        assert!(t.contains(Point::new(30, 20)));
        assert!(!t.contains(Point::new(31, 20)));
        assert!(!t.contains(Point::new(9, 15)));
    }

    #[test]
    fn offset_moves_only_position() {
        let t = Token::new("word", 5, 7, 20, 10, 80.0).offset_by(Point::new(300, 300));
        assert_eq!((t.x, t.y, t.width, t.height), (305, 307, 20, 10));
    }
}
