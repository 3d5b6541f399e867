//! The trigger state machine and its lock-guarded owner.

use std::sync::{Mutex, PoisonError};

use rdev::Key;

use crate::geometry::{Point, Rect};

use super::{InputEvent, TriggerBinding, TriggerKeys};

/// What the controller should do in response to one input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Both corners are known: run the region pipeline.
    StartRegion(Rect),
    /// Run the word pipeline at this cursor position.
    TranslateWord(Point),
    /// Show a message in the overlay.
    Status(String),
}

/// Armed/learning trigger state.
///
/// Pure and single-threaded; wrap it in [`ControllerState`] to share it.
#[derive(Debug)]
pub struct TriggerMachine {
    keys: TriggerKeys,
    /// While learning, a progress status is emitted every this many moves.
    status_every: u32,
    pending: Vec<Point>,
    learning: bool,
    input_count: u32,
    custom: Option<TriggerBinding>,
    /// Keys currently held down. Tracks the learn combination and filters
    /// OS auto-repeat.
    held: Vec<Key>,
}

impl TriggerMachine {
    pub fn new(keys: TriggerKeys, status_every: u32) -> Self {
        Self {
            keys,
            status_every: status_every.max(1),
            pending: Vec::with_capacity(2),
            learning: false,
            input_count: 0,
            custom: None,
            held: Vec::new(),
        }
    }

    pub fn is_learning(&self) -> bool {
        self.learning
    }

    pub fn custom_binding(&self) -> Option<TriggerBinding> {
        self.custom
    }

    /// Inputs observed since learning was last entered.
    pub fn input_count(&self) -> u32 {
        self.input_count
    }

    /// Region corners recorded so far (0 or 1 between selections).
    pub fn pending_points(&self) -> &[Point] {
        &self.pending
    }

    /// Feed one event; `cursor` is the pointer position at the time.
    ///
    /// A `KeyDown` for a key that is already held is auto-repeat and does
    /// nothing.
    pub fn handle(&mut self, event: &InputEvent, cursor: Point) -> Vec<Action> {
        match *event {
            InputEvent::KeyDown(k) => {
                if self.held.contains(&k) {
                    log::trace!("trigger: ignoring repeat of {k:?}");
                    return Vec::new();
                }
                self.held.push(k);
            }
            InputEvent::KeyUp(k) => {
                self.held.retain(|h| *h != k);
                return Vec::new();
            }
            _ => {}
        }

        if self.learning {
            return self.observe_while_learning(event);
        }

        if let InputEvent::KeyDown(k) = *event {
            if self.is_combo_key(k) && self.combo_held() {
                return vec![self.enter_learning()];
            }
        }

        self.handle_armed(event, cursor)
    }

    fn is_combo_key(&self, k: Key) -> bool {
        self.keys.learn.contains(&k)
    }

    fn combo_held(&self) -> bool {
        self.keys.learn.iter().all(|k| self.held.contains(k))
    }

    fn enter_learning(&mut self) -> Action {
        self.learning = true;
        self.input_count = 0;
        log::info!("trigger: learning mode entered");
        Action::Status("Learning: press a key, click or scroll to set the translate trigger".into())
    }

    fn observe_while_learning(&mut self, event: &InputEvent) -> Vec<Action> {
        match *event {
            InputEvent::KeyDown(k) if self.is_combo_key(k) => Vec::new(),
            InputEvent::Move(_) => {
                self.input_count += 1;
                if self.input_count % self.status_every == 0 {
                    vec![Action::Status(format!(
                        "Learning... {} inputs observed",
                        self.input_count
                    ))]
                } else {
                    Vec::new()
                }
            }
            _ => match TriggerBinding::from_event(event) {
                Some(binding) => {
                    self.input_count += 1;
                    self.learning = false;
                    if let Some(old) = self.custom.replace(binding) {
                        log::info!("trigger: replacing {old}");
                    }
                    log::info!("trigger: bound {binding} after {} inputs", self.input_count);
                    vec![Action::Status(format!(
                        "Trigger set to {binding} ({} inputs observed)",
                        self.input_count
                    ))]
                }
                None => Vec::new(),
            },
        }
    }

    fn handle_armed(&mut self, event: &InputEvent, cursor: Point) -> Vec<Action> {
        let mut actions = Vec::new();

        if let InputEvent::KeyDown(k) = *event {
            if k == self.keys.cancel && !self.pending.is_empty() {
                self.pending.clear();
                actions.push(Action::Status("Selection cancelled".into()));
            }

            if k == self.keys.region {
                actions.push(self.add_corner(cursor));
            }

            if k == self.keys.word && self.custom.is_none() {
                actions.push(Action::TranslateWord(cursor));
            }
        }

        if self.custom.is_some_and(|b| b.matches(event)) {
            actions.push(Action::TranslateWord(cursor));
        }

        actions
    }

    fn add_corner(&mut self, cursor: Point) -> Action {
        self.pending.push(cursor);
        if self.pending.len() < 2 {
            return Action::Status(format!("First corner at {cursor}"));
        }
        let rect = Rect::from_corners(self.pending[0], self.pending[1]);
        self.pending.clear();
        Action::StartRegion(rect)
    }
}

// ---------------------------------------------------------------------------
// ControllerState
// ---------------------------------------------------------------------------

/// The one shared [`TriggerMachine`], mutated only under its lock.
///
/// Construct once at startup and hand an `Arc` to the controller.
#[derive(Debug)]
pub struct ControllerState {
    machine: Mutex<TriggerMachine>,
}

impl ControllerState {
    pub fn new(machine: TriggerMachine) -> Self {
        Self {
            machine: Mutex::new(machine),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TriggerMachine> {
        self.machine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn handle(&self, event: &InputEvent, cursor: Point) -> Vec<Action> {
        self.lock().handle(event, cursor)
    }

    pub fn is_learning(&self) -> bool {
        self.lock().is_learning()
    }

    pub fn custom_binding(&self) -> Option<TriggerBinding> {
        self.lock().custom_binding()
    }

    pub fn input_count(&self) -> u32 {
        self.lock().input_count()
    }

    pub fn pending_count(&self) -> usize {
        self.lock().pending_points().len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
