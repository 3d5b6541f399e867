//! Application settings structs, defaults and TOML loading.
//!
//! All structs implement `Deserialize`, `Default` and `Clone` so they can be
//! read from a TOML file and shared across threads. Every section is
//! `#[serde(default)]`, so a file only needs the keys it overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// OcrConfig
// ---------------------------------------------------------------------------

/// Settings for the tesseract OCR engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language code (e.g. `"eng"`).
    pub language: String,
    /// Path or name of the `tesseract` executable.
    pub tesseract_cmd: String,
    /// Page segmentation mode used for region mode (flat text).
    pub region_psm: u32,
    /// Page segmentation mode used for word mode (sparse text, per-word boxes).
    pub word_psm: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".into(),
            tesseract_cmd: "tesseract".into(),
            region_psm: 6,
            word_psm: 11,
        }
    }
}

// ---------------------------------------------------------------------------
// TranslateConfig
// ---------------------------------------------------------------------------

/// Settings for the translation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    /// Language every translation is rendered into (ISO-639-1).
    pub target_language: String,
    /// Source language passed to the backend; `"auto"` lets it detect.
    pub source_language: String,
    /// Base URL of the translation endpoint.
    pub base_url: String,
    /// Maximum seconds to wait for a translation response.
    pub timeout_secs: u64,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            target_language: "tr".into(),
            source_language: "auto".into(),
            base_url: "https://translate.googleapis.com".into(),
            timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// WordConfig
// ---------------------------------------------------------------------------

/// Tuning knobs for the word-at-cursor pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordConfig {
    /// Side length in pixels of the square captured around the cursor.
    pub capture_size: i32,
    /// Tokens below this confidence (0–100) are reported, not translated.
    pub min_confidence: f32,
    /// Shortest token (in characters) that counts as a word.
    pub min_len: usize,
    /// Longest token (in characters) that counts as a word.
    pub max_len: usize,
}

impl Default for WordConfig {
    fn default() -> Self {
        Self {
            capture_size: 400,
            min_confidence: 30.0,
            min_len: 2,
            max_len: 50,
        }
    }
}

// ---------------------------------------------------------------------------
// HotkeyConfig
// ---------------------------------------------------------------------------

/// Global trigger key names, resolved with [`crate::trigger::parse_key`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    /// Each press records one corner of the region selection.
    pub region_key: String,
    /// Translates the word under the cursor (until a custom trigger is learned).
    pub word_key: String,
    /// Two keys that, held together, enter trigger-learning mode.
    pub learn_combo: [String; 2],
    /// Clears a half-finished region selection.
    pub cancel_key: String,
    /// While learning, a progress message is emitted every this many mouse
    /// moves (every move is still counted).
    pub learn_status_every: u32,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            region_key: "Quote".into(),
            word_key: "F8".into(),
            learn_combo: ["ControlLeft".into(), "F9".into()],
            cancel_key: "Escape".into(),
            learn_status_every: 25,
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Overlay window behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Keep the overlay floating above all other windows.
    pub always_on_top: bool,
    /// Initial window width; `None` spans the primary monitor.
    pub width: Option<f32>,
    /// Window height in pixels (three lines of text at the default font).
    pub height: f32,
    /// Initial window position `(x, y)`; defaults to the top-left corner.
    pub window_position: Option<(f32, f32)>,
    /// Background opacity, 0.0 (invisible) to 1.0 (solid).
    pub opacity: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            always_on_top: true,
            width: None,
            height: 120.0,
            window_position: Some((0.0, 0.0)),
            opacity: 0.3,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, read from `settings.toml`.
///
/// ```rust,no_run
/// use screen_translate::config::AppConfig;
///
/// // Returns Default when the file is missing.
/// let config = AppConfig::load().unwrap();
/// assert_eq!(config.word.capture_size, 400);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// OCR engine settings.
    pub ocr: OcrConfig,
    /// Translation backend settings.
    pub translate: TranslateConfig,
    /// Word-at-cursor tuning.
    pub word: WordConfig,
    /// Global trigger keys.
    pub hotkey: HotkeyConfig,
    /// Overlay window settings.
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from [`settings_path`].
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist or the
    /// platform has no config directory.
    pub fn load() -> Result<Self> {
        match settings_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("no platform config directory; using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        Ok(config)
    }
}

/// `<config dir>/screen-translate/settings.toml`, e.g.
/// `~/.config/screen-translate/settings.toml` on Linux.
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
}

const APP_DIR: &str = "screen-translate";
const SETTINGS_FILE: &str = "settings.toml";

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
