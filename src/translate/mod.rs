//! Machine translation.
//!
//! This module provides:
//! * [`Translator`]: async trait implemented by translation backends.
//! * [`GoogleTranslator`]: the public Google Translate web endpoint.
//! * [`TranslationAdapter`]: what the pipelines call: fixed target language,
//!   source auto-detect, empty input short-circuited, failures kept distinct
//!   from an empty translation.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use screen_translate::config::TranslateConfig;
//! use screen_translate::translate::{GoogleTranslator, TranslationAdapter};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = TranslateConfig::default();
//!     let adapter = TranslationAdapter::new(
//!         Arc::new(GoogleTranslator::from_config(&config)),
//!         &config,
//!     );
//!     println!("{}", adapter.translate("good morning").await.display_text());
//! }
//! ```

pub mod adapter;
pub mod google;

pub use adapter::{TranslationAdapter, TranslationResult, NO_TEXT_DETECTED};
pub use google::GoogleTranslator;

use async_trait::async_trait;
use thiserror::Error;

// ---------------------------------------------------------------------------
// TranslateError
// ---------------------------------------------------------------------------

/// Errors that can occur while calling a translation backend.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("translation request timed out")]
    Timeout,

    /// The backend answered with a non-success status.
    #[error("translation service returned HTTP {0}")]
    Status(u16),

    /// The response body did not have the expected shape.
    #[error("failed to parse translation response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for TranslateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TranslateError::Timeout
        } else {
            TranslateError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Translator trait
// ---------------------------------------------------------------------------

/// Async trait for translation backends.
///
/// Implementors must be `Send + Sync` so they can be shared across pipeline
/// tasks behind an `Arc<dyn Translator>`.
///
/// # Arguments
/// * `text`   – Text to translate, already non-empty.
/// * `source` – Source language code, or `"auto"`.
/// * `target` – Target language code.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslateError>;
}
