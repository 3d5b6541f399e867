//! Pipeline stages, the result sink, and the shared display state.
//!
//! [`PipelineStage`] is reported by both pipelines as they advance.
//!
//! [`ResultSink`] is the only way results leave the core. [`SharedDisplay`]
//! (`Arc<Mutex<DisplayState>>`) implements it for the overlay window, which
//! reads it every frame. Concurrent pipeline runs all write to the same
//! display; whichever finishes last is what stays on screen.

use std::sync::{Arc, Mutex, PoisonError};

use super::outcome::TranslationOutcome;
use super::region::RegionResult;

// ---------------------------------------------------------------------------
// PipelineStage
// ---------------------------------------------------------------------------

/// Stages of one pipeline run.
///
/// ```text
/// Idle ─▶ Capturing ─▶ Recognizing ─▶ [Locating] ─▶ Translating ─▶ Done
///   any stage ──failure──▶ Done { success: false }
/// ```
///
/// `Locating` only occurs in word mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineStage {
    #[default]
    Idle,
    Capturing,
    Recognizing,
    Locating,
    Translating,
    Done { success: bool },
}

impl PipelineStage {
    /// Returns `true` while a run is in progress.
    ///
    /// ```
    /// use screen_translate::pipeline::PipelineStage;
    ///
    /// assert!(!PipelineStage::Idle.is_busy());
    /// assert!(PipelineStage::Capturing.is_busy());
    /// assert!(PipelineStage::Translating.is_busy());
    /// assert!(!PipelineStage::Done { success: false }.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            PipelineStage::Capturing
                | PipelineStage::Recognizing
                | PipelineStage::Locating
                | PipelineStage::Translating
        )
    }

    /// A short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            PipelineStage::Idle => "Idle",
            PipelineStage::Capturing => "Capturing",
            PipelineStage::Recognizing => "Recognizing",
            PipelineStage::Locating => "Locating",
            PipelineStage::Translating => "Translating",
            PipelineStage::Done { success: true } => "Done",
            PipelineStage::Done { success: false } => "Failed",
        }
    }
}

// ---------------------------------------------------------------------------
// ResultSink
// ---------------------------------------------------------------------------

/// Presentation-side callbacks invoked by the core.
///
/// Called from pipeline tasks and from the input thread, so implementations
/// must be cheap and must not block.
pub trait ResultSink: Send + Sync {
    fn on_region_result(&self, original: &str, translated: &str);
    fn on_word_result(&self, outcome: &TranslationOutcome);
    fn on_status(&self, message: &str);
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// One-line rendering of a region result.
///
/// ```
/// use screen_translate::pipeline::format_region_result;
///
/// assert_eq!(format_region_result("Hello", "Merhaba"), "Hello : Merhaba");
/// assert_eq!(format_region_result("Hello", ""), "Hello : (translation failed)");
/// assert_eq!(format_region_result("", ""), "No text detected");
/// ```
pub fn format_region_result(original: &str, translated: &str) -> String {
    match (original.is_empty(), translated.is_empty()) {
        (false, false) => format!("{original} : {translated}"),
        (false, true) => format!("{original} : (translation failed)"),
        (true, false) => format!("(no text detected) : {translated}"),
        (true, true) => "No text detected".to_string(),
    }
}

/// One-line rendering of a word outcome.
pub fn format_word_outcome(outcome: &TranslationOutcome) -> String {
    if outcome.success {
        return format!("{} : {}", outcome.original_word, outcome.translated_word);
    }
    let message = outcome.error_message.as_deref().unwrap_or("Word translation failed");
    if outcome.original_word.is_empty() {
        message.to_string()
    } else {
        format!("{} : {message}", outcome.original_word)
    }
}

// ---------------------------------------------------------------------------
// DisplayState
// ---------------------------------------------------------------------------

/// What the overlay shows.
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    /// The single line currently on screen.
    pub text: String,
    /// Most recent region result.
    pub last_region: Option<RegionResult>,
    /// Most recent word outcome.
    pub last_word: Option<TranslationOutcome>,
    /// Incremented on every update so the UI can tell something changed.
    pub revision: u64,
}

impl DisplayState {
    pub fn new(initial_text: impl Into<String>) -> Self {
        Self {
            text: initial_text.into(),
            ..Self::default()
        }
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
        self.revision += 1;
    }
}

/// Thread-safe handle to [`DisplayState`].
///
/// Cheap to clone. Lock for a short critical section only.
pub type SharedDisplay = Arc<Mutex<DisplayState>>;

/// Construct a new [`SharedDisplay`] showing `initial_text`.
pub fn new_shared_display(initial_text: impl Into<String>) -> SharedDisplay {
    Arc::new(Mutex::new(DisplayState::new(initial_text)))
}

impl ResultSink for Mutex<DisplayState> {
    fn on_region_result(&self, original: &str, translated: &str) {
        let mut st = self.lock().unwrap_or_else(PoisonError::into_inner);
        st.last_region = Some(RegionResult {
            original: original.to_string(),
            translated: translated.to_string(),
        });
        st.set_text(format_region_result(original, translated));
    }

    fn on_word_result(&self, outcome: &TranslationOutcome) {
        let mut st = self.lock().unwrap_or_else(PoisonError::into_inner);
        st.last_word = Some(outcome.clone());
        st.set_text(format_word_outcome(outcome));
    }

    fn on_status(&self, message: &str) {
        let mut st = self.lock().unwrap_or_else(PoisonError::into_inner);
        st.set_text(message.to_string());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
