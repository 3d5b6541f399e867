//! Global input hook, backed by `rdev`.
//!
//! # Design
//!
//! `rdev::listen()` is a blocking OS-level call that never returns while the
//! process is alive, so it runs on a **dedicated OS thread**, never inside a
//! tokio task.
//!
//! [`InputListener::start`] spawns that thread. Every event is converted to
//! an [`InputEvent`](crate::trigger::InputEvent); mouse moves also update the
//! shared [`TrackedCursor`], which is how the rest of the program learns where
//! the pointer is when a key is pressed. Until the first move arrives the
//! cursor holds whatever [`pointer_position`] reported at startup.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use screen_translate::input::{pointer_position, InputListener, TrackedCursor};
//!
//! let cursor = Arc::new(TrackedCursor::at(pointer_position()));
//! let _listener = InputListener::start(Arc::clone(&cursor), |event| println!("{event:?}"))
//!     .expect("failed to spawn input thread");
//! ```

pub mod listener;

pub use listener::InputListener;

use std::sync::{Mutex, PoisonError};

use device_query::{DeviceQuery, DeviceState};

use crate::controller::CursorSource;
use crate::geometry::Point;

/// Last pointer position reported by the input hook.
#[derive(Debug, Default)]
pub struct TrackedCursor {
    position: Mutex<Point>,
}

impl TrackedCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(p: Point) -> Self {
        Self {
            position: Mutex::new(p),
        }
    }

    pub fn update(&self, p: Point) {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner) = p;
    }
}

impl CursorSource for TrackedCursor {
    fn position(&self) -> Point {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Ask the OS where the pointer is right now.
///
/// rdev only reports moves, so this is read once at startup.
pub fn pointer_position() -> Point {
    let (x, y) = DeviceState::new().get_mouse().coords;
    Point::new(x, y)
}
