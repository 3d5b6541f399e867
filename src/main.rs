//! Application entry point — Screen Translate.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create the [`tokio`] runtime that pipeline runs are spawned onto.
//! 4. Build the capture, OCR and translation adapters and both pipelines.
//! 5. Build the shared display, the trigger state and the controller.
//! 6. Spawn the global input listener thread.
//! 7. Run [`eframe::run_native`], which blocks the main thread until the overlay
//!    is closed.

use std::sync::Arc;

use anyhow::Context;
use screen_translate::{
    app::{hint_text, viewport, OverlayApp},
    capture::{primary_monitor_width, RegionCapturer},
    config::AppConfig,
    controller::CaptureController,
    input::{pointer_position, InputListener, TrackedCursor},
    ocr::{OcrAdapter, TesseractEngine},
    pipeline::{new_shared_display, RegionPipeline, WordPipeline},
    translate::{GoogleTranslator, TranslationAdapter},
    trigger::{ControllerState, TriggerKeys, TriggerMachine},
};

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Screen Translate starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e:#}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime (pipeline runs; blocking work goes to its blocking pool)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    // 4. Adapters and pipelines
    let capturer = Arc::new(RegionCapturer::xcap());
    let ocr = OcrAdapter::new(
        Arc::new(TesseractEngine::from_config(&config.ocr)),
        config.ocr.language.clone(),
    )
    .with_word_len(config.word.min_len, config.word.max_len);
    let translator = TranslationAdapter::new(
        Arc::new(GoogleTranslator::from_config(&config.translate)),
        &config.translate,
    );
    log::info!(
        "OCR language {}, translating {} → {}",
        config.ocr.language,
        config.translate.source_language,
        translator.target()
    );

    let region = RegionPipeline::new(Arc::clone(&capturer), ocr.clone(), translator.clone());
    let word = WordPipeline::new(capturer, ocr, translator, &config.word);

    // 5. Display, trigger state, controller
    let display = new_shared_display(hint_text(&config.hotkey.region_key));
    let state = Arc::new(ControllerState::new(TriggerMachine::new(
        TriggerKeys::from_config(&config.hotkey),
        config.hotkey.learn_status_every,
    )));
    let cursor = Arc::new(TrackedCursor::at(pointer_position()));
    let controller = CaptureController::new(
        state,
        region,
        word,
        display.clone(),
        cursor.clone(),
        rt.handle().clone(),
    );

    // 6. Global input hook
    let _listener = InputListener::start(cursor, move |event| controller.on_event(&event))
        .context("failed to spawn input-listener thread")?;

    // 7. Overlay (blocks until the window is closed)
    let screen_width = primary_monitor_width().map(|w| w as f32);
    let options = eframe::NativeOptions {
        viewport: viewport(&config.ui, screen_width),
        ..Default::default()
    };
    let app = OverlayApp::new(display, &config.ui);

    eframe::run_native("Screen Translate", options, Box::new(move |_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("overlay window failed: {e}"))?;

    log::info!("Screen Translate shutting down");
    Ok(())
}
