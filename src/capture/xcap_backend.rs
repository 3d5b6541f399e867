//! Screen grabbers backed by the `xcap` crate.
//!
//! * [`MonitorGrabber`] captures only the monitor under the rectangle's
//!   top-left corner and crops it. Cheap, and enough for the common case.
//! * [`DesktopGrabber`] captures every monitor, pastes them onto one canvas
//!   laid out by their virtual-desktop positions, then crops. Slower, but it
//!   survives a rectangle that starts in a gap between monitors.

use image::RgbaImage;
use xcap::Monitor;

use super::{crop_to, CaptureError, ScreenGrabber};
use crate::geometry::{Point, Rect};

fn backend_err(e: impl std::fmt::Display) -> CaptureError {
    CaptureError::Backend(e.to_string())
}

fn monitor_bounds(monitor: &Monitor) -> Rect {
    let x = monitor.x();
    let y = monitor.y();
    Rect::new(x, y, x + monitor.width() as i32, y + monitor.height() as i32)
}

fn contains(bounds: &Rect, p: Point) -> bool {
    p.x >= bounds.x1 && p.x < bounds.x2 && p.y >= bounds.y1 && p.y < bounds.y2
}

/// Capture one monitor into an `image::RgbaImage`.
///
/// Goes through the raw buffer so the result does not depend on xcap's own
/// `image` re-export matching ours.
fn capture_monitor(monitor: &Monitor) -> Result<RgbaImage, CaptureError> {
    let shot = monitor.capture_image().map_err(backend_err)?;
    let (width, height) = (shot.width(), shot.height());
    RgbaImage::from_raw(width, height, shot.into_raw())
        .ok_or_else(|| backend_err("monitor returned a truncated pixel buffer"))
}

/// Width of the primary monitor, used to size the overlay strip.
pub fn primary_monitor_width() -> Option<u32> {
    match Monitor::all() {
        Ok(monitors) => monitors.iter().find(|m| m.is_primary()).map(|m| m.width()),
        Err(e) => {
            log::warn!("capture: cannot list monitors: {e}");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// MonitorGrabber
// ---------------------------------------------------------------------------

/// Primary strategy: single-monitor capture.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonitorGrabber;

impl ScreenGrabber for MonitorGrabber {
    fn grab(&self, rect: Rect) -> Result<RgbaImage, CaptureError> {
        let monitors = Monitor::all().map_err(backend_err)?;
        let monitor = monitors
            .iter()
            .find(|m| contains(&monitor_bounds(m), rect.origin()))
            .ok_or(CaptureError::OffScreen(rect))?;

        let bounds = monitor_bounds(monitor);
        let image = capture_monitor(monitor)?;
        crop_to(&image, bounds, rect)
    }
}

// ---------------------------------------------------------------------------
// DesktopGrabber
// ---------------------------------------------------------------------------

/// Fallback strategy: whole virtual desktop, then crop.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopGrabber;

impl ScreenGrabber for DesktopGrabber {
    fn grab(&self, rect: Rect) -> Result<RgbaImage, CaptureError> {
        let monitors = Monitor::all().map_err(backend_err)?;
        if monitors.is_empty() {
            return Err(backend_err("no monitors detected"));
        }

        let desktop = monitors
            .iter()
            .map(monitor_bounds)
            .reduce(|a, b| Rect::new(a.x1.min(b.x1), a.y1.min(b.y1), a.x2.max(b.x2), a.y2.max(b.y2)))
            .ok_or(CaptureError::OffScreen(rect))?;

        let mut canvas = RgbaImage::new(desktop.width() as u32, desktop.height() as u32);
        for monitor in &monitors {
            let bounds = monitor_bounds(monitor);
            let shot = capture_monitor(monitor)?;
            image::imageops::overlay(
                &mut canvas,
                &shot,
                i64::from(bounds.x1 - desktop.x1),
                i64::from(bounds.y1 - desktop.y1),
            );
        }

        crop_to(&canvas, desktop, rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let b = Rect::new(0, 0, 1920, 1080);
        assert!(contains(&b, Point::new(0, 0)));
        assert!(contains(&b, Point::new(1919, 1079)));
        assert!(!contains(&b, Point::new(1920, 500)));
        assert!(!contains(&b, Point::new(-1, 500)));
    }
}
