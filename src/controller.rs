//! Event-driven front end: input events in, pipeline runs out.
//!
//! [`CaptureController::on_event`] is called on the input thread for every
//! event. It updates the shared [`ControllerState`] and hands each resulting
//! pipeline run to the tokio runtime without waiting for it, so the input
//! thread is never blocked by capture, OCR or network.
//!
//! Runs are never joined or cancelled. When several overlap, each reports
//! to the sink as it finishes and the last one stays on screen.

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::geometry::{Point, Rect};
use crate::pipeline::{RegionPipeline, ResultSink, TranslationOutcome, WordError, WordPipeline};
use crate::trigger::{Action, ControllerState, InputEvent};

/// Where the pointer is right now.
pub trait CursorSource: Send + Sync {
    fn position(&self) -> Point;
}

pub struct CaptureController {
    state: Arc<ControllerState>,
    region: RegionPipeline,
    word: WordPipeline,
    sink: Arc<dyn ResultSink>,
    cursor: Arc<dyn CursorSource>,
    runtime: Handle,
}

impl CaptureController {
    pub fn new(
        state: Arc<ControllerState>,
        region: RegionPipeline,
        word: WordPipeline,
        sink: Arc<dyn ResultSink>,
        cursor: Arc<dyn CursorSource>,
        runtime: Handle,
    ) -> Self {
        Self {
            state,
            region,
            word,
            sink,
            cursor,
            runtime,
        }
    }

    /// Handle one input event. Returns immediately.
    pub fn on_event(&self, event: &InputEvent) {
        let cursor = match *event {
            InputEvent::Move(p) => p,
            _ => self.cursor.position(),
        };

        for action in self.state.handle(event, cursor) {
            self.dispatch(action);
        }
    }

    fn dispatch(&self, action: Action) {
        match action {
            Action::Status(message) => self.sink.on_status(&message),
            Action::StartRegion(rect) => {
                self.sink.on_status("Processing...");
                self.spawn_region(rect);
            }
            Action::TranslateWord(cursor) => self.spawn_word(cursor),
        }
    }

    fn spawn_region(&self, rect: Rect) {
        log::info!("controller: region {rect}");
        let pipeline = self.region.clone();
        let run = self.runtime.spawn(async move { pipeline.run(rect).await });

        let sink = Arc::clone(&self.sink);
        self.runtime.spawn(async move {
            match run.await {
                Ok(result) => sink.on_region_result(&result.original, &result.translated),
                Err(e) => {
                    log::error!("controller: region task failed: {e}");
                    sink.on_region_result("Unexpected error", &e.to_string());
                }
            }
        });
    }

    fn spawn_word(&self, cursor: Point) {
        log::info!("controller: word at {cursor}");
        let pipeline = self.word.clone();
        let run = self.runtime.spawn(async move { pipeline.run(cursor).await });

        let sink = Arc::clone(&self.sink);
        self.runtime.spawn(async move {
            let outcome = match run.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::error!("controller: word task failed: {e}");
                    TranslationOutcome::failure(&WordError::Unexpected(e.to_string()), cursor)
                }
            };
            sink.on_word_result(&outcome);
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{CaptureError, RegionCapturer, ScreenGrabber};
    use crate::config::{TranslateConfig, WordConfig};
    use crate::ocr::{OcrAdapter, OcrEngine, OcrError, Token};
    use crate::pipeline::{new_shared_display, SharedDisplay};
    use crate::translate::{TranslateError, TranslationAdapter, Translator};
    use crate::trigger::{ScrollDirection, TriggerKeys, TriggerMachine};
    use async_trait::async_trait;
    use image::RgbaImage;
    use rdev::Key;
    use std::sync::Mutex;
    use std::time::Duration;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    struct Blank;

    impl ScreenGrabber for Blank {
        fn grab(&self, rect: Rect) -> Result<RgbaImage, CaptureError> {
            Ok(RgbaImage::new(rect.width() as u32, rect.height() as u32))
        }
    }

    /// "hello" as flat text; one "hello" token at the centre of a 400px square.
    struct Hello;

    impl OcrEngine for Hello {
        fn text_of(&self, _image: &RgbaImage, _lang: &str) -> Result<String, OcrError> {
            Ok("hello".into())
        }

        fn tokens_of(&self, _image: &RgbaImage, _lang: &str) -> Result<Vec<Token>, OcrError> {
            Ok(vec![Token::new("hello", 190, 195, 30, 10, 95.0)])
        }
    }

    struct Merhaba {
        panic: bool,
    }

    #[async_trait]
    impl Translator for Merhaba {
        async fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<String, TranslateError> {
            if self.panic {
                panic!("translator exploded");
            }
            Ok("merhaba".into())
        }
    }

    struct TestCursor(Mutex<Point>);

    impl TestCursor {
        fn move_to(&self, p: Point) {
            *self.0.lock().unwrap() = p;
        }
    }

    impl CursorSource for TestCursor {
        fn position(&self) -> Point {
            *self.0.lock().unwrap()
        }
    }

    struct Fixture {
        controller: CaptureController,
        display: SharedDisplay,
        state: Arc<ControllerState>,
        cursor: Arc<TestCursor>,
    }

    fn fixture(translator_panics: bool) -> Fixture {
        let capturer = Arc::new(RegionCapturer::new(Box::new(Blank), Box::new(Blank)));
        let ocr = OcrAdapter::new(Arc::new(Hello), "eng");
        let translator = TranslationAdapter::new(
            Arc::new(Merhaba {
                panic: translator_panics,
            }),
            &TranslateConfig::default(),
        );

        let region = RegionPipeline::new(Arc::clone(&capturer), ocr.clone(), translator.clone());
        let word = WordPipeline::new(capturer, ocr, translator, &WordConfig::default());

        let display = new_shared_display("ready");
        let state = Arc::new(ControllerState::new(TriggerMachine::new(TriggerKeys::default(), 25)));

        let cursor = Arc::new(TestCursor(Mutex::new(Point::new(500, 500))));

        let controller = CaptureController::new(
            Arc::clone(&state),
            region,
            word,
            display.clone(),
            cursor.clone(),
            Handle::current(),
        );
        Fixture {
            controller,
            display,
            state,
            cursor,
        }
    }

    /// Wait until the display reaches `revision`, or give up after 2 s.
    async fn wait_for_revision(display: &SharedDisplay, revision: u64) -> String {
        for _ in 0..200 {
            {
                let st = display.lock().unwrap();
                if st.revision >= revision {
                    return st.text.clone();
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("display never reached revision {revision}");
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn region_key_twice_shows_processing_then_result() {
        let f = fixture(false);

        f.controller.on_event(&InputEvent::KeyDown(Key::Quote));
        f.controller.on_event(&InputEvent::KeyUp(Key::Quote));
        assert!(f.display.lock().unwrap().text.starts_with("First corner"));

        f.cursor.move_to(Point::new(700, 600));
        f.controller.on_event(&InputEvent::KeyDown(Key::Quote));
        assert_eq!(f.display.lock().unwrap().text, "Processing...");

        assert_eq!(wait_for_revision(&f.display, 3).await, "hello : merhaba");
        let region = f.display.lock().unwrap().last_region.clone().unwrap();
        assert_eq!(region.translated, "merhaba");
    }

    #[tokio::test]
    async fn word_key_translates_word_under_cursor() {
        let f = fixture(false);

        f.controller.on_event(&InputEvent::KeyDown(Key::F8));

        assert_eq!(wait_for_revision(&f.display, 1).await, "hello : merhaba");
        let last = f.display.lock().unwrap().last_word.clone().unwrap();
        assert!(last.success);
        assert_eq!(last.position, Point::new(490, 495));
    }

    #[tokio::test]
    async fn learned_scroll_trigger_fires_word_translation() {
        let f = fixture(false);

        f.controller.on_event(&InputEvent::KeyDown(Key::ControlLeft));
        f.controller.on_event(&InputEvent::KeyDown(Key::F9));
        assert!(f.state.is_learning());
        f.controller.on_event(&InputEvent::Scroll(ScrollDirection::Down));
        assert!(f.display.lock().unwrap().text.contains("mouse_scroll_down"));

        let before = f.display.lock().unwrap().revision;
        f.controller.on_event(&InputEvent::Scroll(ScrollDirection::Down));
        assert_eq!(
            wait_for_revision(&f.display, before + 1).await,
            "hello : merhaba"
        );
    }

    #[tokio::test]
    async fn panicking_run_becomes_unexpected_error() {
        let f = fixture(true);

        f.controller.on_event(&InputEvent::KeyDown(Key::F8));

        let text = wait_for_revision(&f.display, 1).await;
        assert!(text.starts_with("Unexpected error"), "{text}");
        let last = f.display.lock().unwrap().last_word.clone().unwrap();
        assert!(!last.success);
    }

    #[tokio::test]
    async fn on_event_does_not_wait_for_pipelines() {
        let f = fixture(false);

        f.controller.on_event(&InputEvent::KeyDown(Key::F8));
        // Nothing has had a chance to run yet on this single-threaded runtime.
        assert_eq!(f.display.lock().unwrap().revision, 0);

        wait_for_revision(&f.display, 1).await;
    }
}
