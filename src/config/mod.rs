//! Configuration module for screen-translate.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for each subsystem,
//! and `settings_path` for the platform settings file. Settings are read once
//! at startup via `AppConfig::load`; nothing is written back.

pub mod settings;

pub use settings::{
    settings_path, AppConfig, HotkeyConfig, OcrConfig, TranslateConfig, UiConfig, WordConfig,
};
