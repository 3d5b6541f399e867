//! Screen capture for arbitrary rectangles.
//!
//! [`RegionCapturer`] owns two [`ScreenGrabber`]s: a fast primary one and a
//! slower fallback that is only tried when the primary errors. The xcap
//! implementations live in [`xcap_backend`].
//!
//! All grabbers are blocking; callers on the async runtime wrap them in
//! `tokio::task::spawn_blocking`.

pub mod xcap_backend;

pub use xcap_backend::{primary_monitor_width, DesktopGrabber, MonitorGrabber};

use image::RgbaImage;
use thiserror::Error;

use crate::geometry::Rect;

// ---------------------------------------------------------------------------
// CaptureError
// ---------------------------------------------------------------------------

/// Errors that can arise while grabbing screen pixels.
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    /// The rectangle encloses no pixel; no grabber was called.
    #[error("invalid capture region {0}")]
    InvalidRegion(Rect),

    /// The rectangle does not overlap any monitor.
    #[error("region {0} is outside every monitor")]
    OffScreen(Rect),

    /// The platform capture API reported an error.
    #[error("screen grab failed: {0}")]
    Backend(String),

    /// Both the primary and the fallback strategy failed.
    #[error("capture failed (primary: {primary}; fallback: {fallback})")]
    Failed { primary: String, fallback: String },
}

// ---------------------------------------------------------------------------
// ScreenGrabber
// ---------------------------------------------------------------------------

/// One strategy for turning a screen rectangle into pixels.
///
/// Implementations return whatever part of `rect` lies on screen; a rectangle
/// hanging past the bottom/right edge yields a smaller image, not an error.
pub trait ScreenGrabber: Send + Sync {
    fn grab(&self, rect: Rect) -> Result<RgbaImage, CaptureError>;
}

// ---------------------------------------------------------------------------
// RegionCapturer
// ---------------------------------------------------------------------------

/// Primary grabber with a fallback.
pub struct RegionCapturer {
    primary: Box<dyn ScreenGrabber>,
    fallback: Box<dyn ScreenGrabber>,
}

impl RegionCapturer {
    pub fn new(primary: Box<dyn ScreenGrabber>, fallback: Box<dyn ScreenGrabber>) -> Self {
        Self { primary, fallback }
    }

    /// Single-monitor grab with a whole-desktop fallback, both via xcap.
    pub fn xcap() -> Self {
        Self::new(Box::new(MonitorGrabber), Box::new(DesktopGrabber))
    }

    /// Capture `rect`.
    ///
    /// # Errors
    ///
    /// - [`CaptureError::InvalidRegion`] for a rectangle with non-positive
    ///   width or height (no grabber is touched).
    /// - [`CaptureError::Failed`] when both strategies fail.
    pub fn capture(&self, rect: Rect) -> Result<RgbaImage, CaptureError> {
        if !rect.is_valid() {
            return Err(CaptureError::InvalidRegion(rect));
        }

        let primary_err = match self.primary.grab(rect) {
            Ok(image) => return Ok(image),
            Err(e) => e,
        };
        log::warn!("capture: primary grab of {rect} failed ({primary_err}), trying fallback");

        self.fallback.grab(rect).map_err(|fallback_err| {
            log::error!("capture: fallback grab of {rect} failed: {fallback_err}");
            CaptureError::Failed {
                primary: primary_err.to_string(),
                fallback: fallback_err.to_string(),
            }
        })
    }
}

/// Crop `image`, whose top-left pixel sits at `bounds.origin()` on screen, to
/// the on-screen part of `rect`.
pub(crate) fn crop_to(
    image: &RgbaImage,
    bounds: Rect,
    rect: Rect,
) -> Result<RgbaImage, CaptureError> {
    let area = rect.intersect(&bounds).ok_or(CaptureError::OffScreen(rect))?;
    let x = (area.x1 - bounds.x1) as u32;
    let y = (area.y1 - bounds.y1) as u32;
    Ok(image::imageops::crop_imm(image, x, y, area.width() as u32, area.height() as u32).to_image())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Grabber that returns a blank image of the requested size, or fails.
    struct FakeGrabber {
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    impl FakeGrabber {
        fn new(fail: bool) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    fail,
                    calls: Arc::clone(&calls),
                },
                calls,
            )
        }
    }

    impl ScreenGrabber for FakeGrabber {
        fn grab(&self, rect: Rect) -> Result<RgbaImage, CaptureError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(CaptureError::Backend("boom".into()))
            } else {
                Ok(RgbaImage::new(rect.width() as u32, rect.height() as u32))
            }
        }
    }

    #[test]
    fn invalid_region_touches_no_grabber() {
        let (primary, primary_calls) = FakeGrabber::new(false);
        let (fallback, fallback_calls) = FakeGrabber::new(false);
        let capturer = RegionCapturer::new(Box::new(primary), Box::new(fallback));

        let err = capturer.capture(Rect::new(10, 10, 5, 5)).unwrap_err();

        assert!(matches!(err, CaptureError::InvalidRegion(_)));
        assert_eq!(primary_calls.load(Ordering::SeqCst), 0);
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn primary_success_skips_fallback() {
        let (primary, _) = FakeGrabber::new(false);
        let (fallback, fallback_calls) = FakeGrabber::new(false);
        let capturer = RegionCapturer::new(Box::new(primary), Box::new(fallback));

        let image = capturer.capture(Rect::new(0, 0, 100, 50)).unwrap();

        assert_eq!(image.dimensions(), (100, 50));
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn primary_failure_uses_fallback() {
        let (primary, _) = FakeGrabber::new(true);
        let (fallback, fallback_calls) = FakeGrabber::new(false);
        let capturer = RegionCapturer::new(Box::new(primary), Box::new(fallback));

        let image = capturer.capture(Rect::new(0, 0, 30, 20)).unwrap();

        assert_eq!(image.dimensions(), (30, 20));
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn both_failing_reports_capture_failure() {
        let (primary, _) = FakeGrabber::new(true);
        let (fallback, _) = FakeGrabber::new(true);
        let capturer = RegionCapturer::new(Box::new(primary), Box::new(fallback));

        let err = capturer.capture(Rect::new(0, 0, 30, 20)).unwrap_err();
        assert!(matches!(err, CaptureError::Failed { .. }));
    }

    #[test]
    fn crop_to_returns_visible_part() {
        let mut screen = RgbaImage::new(200, 100);
        screen.put_pixel(150, 60, image::Rgba([255, 0, 0, 255]));
        let bounds = Rect::new(0, 0, 200, 100);

        // Hangs past the bottom-right edge.
        let cropped = crop_to(&screen, bounds, Rect::new(150, 60, 350, 260)).unwrap();

        assert_eq!(cropped.dimensions(), (50, 40));
        assert_eq!(cropped.get_pixel(0, 0), &image::Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn crop_to_handles_offset_monitor() {
        let screen = RgbaImage::new(100, 100);
        let bounds = Rect::new(1920, 0, 2020, 100);

        let cropped = crop_to(&screen, bounds, Rect::new(1950, 10, 1960, 30)).unwrap();
        assert_eq!(cropped.dimensions(), (10, 20));
    }

    #[test]
    fn crop_to_outside_bounds_is_off_screen() {
        let screen = RgbaImage::new(100, 100);
        let err = crop_to(&screen, Rect::new(0, 0, 100, 100), Rect::new(200, 200, 300, 300))
            .unwrap_err();
        assert!(matches!(err, CaptureError::OffScreen(_)));
    }
}
