//! Dedicated OS-thread input listener using `rdev::listen`.
//!
//! # Shutdown caveat
//!
//! `rdev::listen` has no graceful shutdown API. Dropping the
//! [`InputListener`] sets a stop flag so events are no longer forwarded, but
//! the OS thread stays blocked in the rdev event loop until the process
//! exits.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::geometry::Point;
use crate::trigger::InputEvent;

use super::TrackedCursor;

/// Update the cursor for moves, then convert and forward the event.
fn route<F>(event: &rdev::EventType, cursor: &TrackedCursor, handler: &F)
where
    F: Fn(InputEvent),
{
    if let rdev::EventType::MouseMove { x, y } = *event {
        cursor.update(Point::new(x.round() as i32, y.round() as i32));
    }
    if let Some(ev) = InputEvent::from_rdev(event) {
        handler(ev);
    }
}

/// Handle to a running input listener thread.
///
/// Construct one with [`InputListener::start`]. Drop it to stop forwarding
/// events.
pub struct InputListener {
    stop: Arc<AtomicBool>,
    /// Never joined: `rdev::listen` does not return.
    _thread: std::thread::JoinHandle<()>,
}

impl InputListener {
    /// Spawn the listener thread. `handler` runs on that thread for every
    /// usable event, in delivery order, and must not block.
    pub fn start<F>(cursor: Arc<TrackedCursor>, handler: F) -> std::io::Result<Self>
    where
        F: Fn(InputEvent) + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_clone = Arc::clone(&stop);

        let thread = std::thread::Builder::new()
            .name("input-listener".into())
            .spawn(move || {
                let result = rdev::listen(move |event| {
                    if stop_clone.load(Ordering::Relaxed) {
                        return;
                    }
                    route(&event.event_type, &cursor, &handler);
                });

                if let Err(e) = result {
                    log::error!("input-listener: rdev::listen exited with error: {:?}", e);
                }
            })?;

        log::info!("input-listener: started");
        Ok(Self {
            stop,
            _thread: thread,
        })
    }
}

impl Drop for InputListener {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::CursorSource;
    use crate::trigger::ScrollDirection;
    use std::sync::Mutex;

    fn collect(events: &[rdev::EventType]) -> (Vec<InputEvent>, Point) {
        let cursor = TrackedCursor::new();
        let seen = Mutex::new(Vec::new());
        let handler = |ev: InputEvent| seen.lock().unwrap().push(ev);
        for e in events {
            route(e, &cursor, &handler);
        }
        (seen.into_inner().unwrap(), cursor.position())
    }

    #[test]
    fn moves_update_cursor_and_are_forwarded() {
        let (events, pos) = collect(&[
            rdev::EventType::MouseMove { x: 10.0, y: 20.0 },
            rdev::EventType::MouseMove { x: 30.4, y: 40.6 },
        ]);
        assert_eq!(pos, Point::new(30, 41));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn releases_and_flat_scrolls_are_dropped() {
        let (events, _) = collect(&[
            rdev::EventType::ButtonPress(rdev::Button::Left),
            rdev::EventType::ButtonRelease(rdev::Button::Left),
            rdev::EventType::Wheel { delta_x: 1, delta_y: 0 },
            rdev::EventType::Wheel { delta_x: 0, delta_y: -3 },
        ]);
        assert_eq!(
            events,
            vec![
                InputEvent::Click(rdev::Button::Left),
                InputEvent::Scroll(ScrollDirection::Down),
            ]
        );
    }
}
