//! Pipeline-facing wrapper around a [`Translator`].

use std::sync::Arc;

use super::Translator;
use crate::config::TranslateConfig;

/// Shown in place of a translation when there was nothing to translate.
pub const NO_TEXT_DETECTED: &str = "No text detected";

/// Outcome of one translation request.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationResult {
    /// The backend answered; the text may legitimately be empty.
    Translated(String),
    /// Input was empty or whitespace; the backend was not called.
    NoText,
    /// The backend failed; carries the error detail.
    Failed(String),
}

impl TranslationResult {
    /// Text to display as the "translated" side of a result.
    pub fn display_text(&self) -> String {
        match self {
            TranslationResult::Translated(text) => text.clone(),
            TranslationResult::NoText => NO_TEXT_DETECTED.to_string(),
            TranslationResult::Failed(detail) => format!("Translation Error: {detail}"),
        }
    }
}

/// Translator bound to the configured source/target languages.
#[derive(Clone)]
pub struct TranslationAdapter {
    translator: Arc<dyn Translator>,
    source: String,
    target: String,
}

impl TranslationAdapter {
    pub fn new(translator: Arc<dyn Translator>, config: &TranslateConfig) -> Self {
        Self {
            translator,
            source: config.source_language.clone(),
            target: config.target_language.clone(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Translate `text` into the configured target language.
    pub async fn translate(&self, text: &str) -> TranslationResult {
        if text.trim().is_empty() {
            return TranslationResult::NoText;
        }

        match self.translator.translate(text, &self.source, &self.target).await {
            Ok(translated) => TranslationResult::Translated(translated),
            Err(e) => {
                log::warn!("translate: request to {} failed: {e}", self.target);
                TranslationResult::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::TranslateError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records the languages it was called with and answers with `reply`.
    struct Recording {
        reply: Result<String, ()>,
        calls: AtomicUsize,
        langs: Mutex<Option<(String, String)>>,
    }

    impl Recording {
        fn new(reply: Result<String, ()>) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                langs: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl Translator for Recording {
        async fn translate(&self, _text: &str, source: &str, target: &str) -> Result<String, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.langs.lock().unwrap() = Some((source.to_string(), target.to_string()));
            self.reply.clone().map_err(|_| TranslateError::Timeout)
        }
    }

    #[tokio::test]
    async fn whitespace_input_skips_backend() {
        let backend = Arc::new(Recording::new(Ok("x".into())));
        let adapter = TranslationAdapter::new(backend.clone(), &TranslateConfig::default());

        assert_eq!(adapter.translate("  \t ").await, TranslationResult::NoText);
        assert_eq!(adapter.translate("").await, TranslationResult::NoText);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn uses_auto_source_and_configured_target() {
        let backend = Arc::new(Recording::new(Ok("merhaba".into())));
        let adapter = TranslationAdapter::new(backend.clone(), &TranslateConfig::default());

        let out = adapter.translate("hello").await;

        assert_eq!(out, TranslationResult::Translated("merhaba".into()));
        assert_eq!(
            backend.langs.lock().unwrap().clone(),
            Some(("auto".to_string(), "tr".to_string()))
        );
    }

    #[tokio::test]
    async fn empty_translation_is_not_a_failure() {
        let backend = Arc::new(Recording::new(Ok(String::new())));
        let adapter = TranslationAdapter::new(backend, &TranslateConfig::default());

        assert_eq!(adapter.translate("hello").await, TranslationResult::Translated(String::new()));
    }

    #[tokio::test]
    async fn backend_failure_is_distinct() {
        let backend = Arc::new(Recording::new(Err(())));
        let adapter = TranslationAdapter::new(backend, &TranslateConfig::default());

        let out = adapter.translate("hello").await;
        assert!(matches!(out, TranslationResult::Failed(_)));
        assert!(out.display_text().starts_with("Translation Error:"));
    }

    #[test]
    fn no_text_display() {
        assert_eq!(TranslationResult::NoText.display_text(), NO_TEXT_DETECTED);
    }
}
