//! Translation overlay — egui/eframe application.
//!
//! # Architecture
//!
//! [`OverlayApp`] is the top-level [`eframe::App`]. It owns nothing but a
//! [`SharedDisplay`] handle: pipelines write results into it from worker
//! tasks, and `update()` copies the current line out under the lock every
//! frame.
//!
//! The window is a borderless, always-on-top, translucent strip across the
//! top of the screen.
//!
//! | Input | Effect |
//! |-------|--------|
//! | Left-drag anywhere | Move the window |
//! | Right-click | Close |
//! | Ctrl+Q | Close |

use std::sync::PoisonError;
use std::time::Duration;

use eframe::egui;

use crate::config::UiConfig;
use crate::pipeline::SharedDisplay;

/// How often the overlay re-reads the shared display when idle.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Fallback strip width when the primary monitor cannot be queried.
const FALLBACK_WIDTH: f32 = 1280.0;

/// Background alpha for an opacity setting, clamped to 0.0–1.0.
///
/// ```
/// use screen_translate::app::background_alpha;
///
/// assert_eq!(background_alpha(0.3), 77);
/// assert_eq!(background_alpha(2.0), 255);
/// assert_eq!(background_alpha(-1.0), 0);
/// ```
pub fn background_alpha(opacity: f32) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Viewport for the overlay strip. `screen_width` is used when the config
/// leaves the width unset.
pub fn viewport(config: &UiConfig, screen_width: Option<f32>) -> egui::ViewportBuilder {
    let width = config
        .width
        .or(screen_width)
        .unwrap_or(FALLBACK_WIDTH);

    let mut builder = egui::ViewportBuilder::default()
        .with_title("Screen Translate")
        .with_inner_size([width, config.height])
        .with_decorations(false)
        .with_transparent(true)
        .with_resizable(false);

    if config.always_on_top {
        builder = builder.with_always_on_top();
    }
    if let Some((x, y)) = config.window_position {
        builder = builder.with_position([x, y]);
    }
    builder
}

/// Initial overlay text.
pub fn hint_text(region_key: &str) -> String {
    format!("Press {region_key} at two corners to translate a region")
}

// ---------------------------------------------------------------------------
// OverlayApp
// ---------------------------------------------------------------------------

/// eframe application for the translation overlay.
pub struct OverlayApp {
    display: SharedDisplay,
    background: egui::Color32,
    /// Text currently rendered; refreshed when the display revision moves.
    text: String,
    revision: Option<u64>,
}

impl OverlayApp {
    pub fn new(display: SharedDisplay, config: &UiConfig) -> Self {
        Self {
            display,
            background: egui::Color32::from_black_alpha(background_alpha(config.opacity)),
            text: String::new(),
            revision: None,
        }
    }

    /// Copy the display text if it changed since the last frame.
    fn refresh(&mut self) {
        let st = self.display.lock().unwrap_or_else(PoisonError::into_inner);
        if self.revision != Some(st.revision) {
            self.text.clone_from(&st.text);
            self.revision = Some(st.revision);
        }
    }

    fn handle_window_input(&self, ctx: &egui::Context, response: &egui::Response) {
        if response.dragged() {
            if let Some(outer_rect) = ctx.input(|i| i.viewport().outer_rect) {
                let delta = ctx.input(|i| i.pointer.delta());
                ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(outer_rect.min + delta));
            }
        }

        let quit = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::Q));
        if response.secondary_clicked() || quit {
            log::info!("overlay: close requested");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for OverlayApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh();

        // Results arrive from worker tasks, not from window events.
        ctx.request_repaint_after(POLL_INTERVAL);

        let frame = egui::Frame::new()
            .fill(self.background)
            .inner_margin(egui::Margin::same(8));

        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let response = ui.interact(
                ui.max_rect(),
                egui::Id::new("overlay-background"),
                egui::Sense::click_and_drag(),
            );

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(self.text.as_str())
                            .color(egui::Color32::WHITE)
                            .size(16.0),
                    )
                    .wrap()
                    .selectable(false),
                );
            });

            self.handle_window_input(ctx, &response);
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("overlay closing");
    }
}
