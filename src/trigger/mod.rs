//! Input triggers: which raw events start a region selection or a word
//! translation, and the learn-a-new-trigger mode.
//!
//! # Design
//!
//! The input thread converts each `rdev` event into an [`InputEvent`] and
//! feeds it, together with the current cursor position, to
//! [`ControllerState::handle`]. The state machine never touches the screen,
//! OCR or network; it only answers with a list of [`Action`]s for the
//! controller to dispatch.
//!
//! ```text
//!            learn combo held          first key / click / scroll
//!   Armed ─────────────────────▶ Learning ─────────────────────────▶ Armed(custom)
//! ```
//!
//! # Usage
//!
//! ```
//! use screen_translate::config::HotkeyConfig;
//! use screen_translate::geometry::{Point, Rect};
//! use screen_translate::trigger::{Action, ControllerState, InputEvent, TriggerKeys, TriggerMachine};
//!
//! let keys = TriggerKeys::from_config(&HotkeyConfig::default());
//! let state = ControllerState::new(TriggerMachine::new(keys, 25));
//!
//! state.handle(&InputEvent::KeyDown(rdev::Key::Quote), Point::new(10, 40));
//! let actions = state.handle(&InputEvent::KeyDown(rdev::Key::Quote), Point::new(90, 5));
//! assert_eq!(actions, vec![Action::StartRegion(Rect::new(10, 5, 90, 40))]);
//! ```

pub mod machine;

pub use machine::{Action, ControllerState, TriggerMachine};

use std::fmt;

use rdev::{Button, Key};

use crate::config::HotkeyConfig;
use crate::geometry::Point;

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Direction of one scroll-wheel tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// A raw input event, stripped down to what the triggers care about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// A mouse button press (releases are not reported).
    Click(Button),
    Scroll(ScrollDirection),
    Move(Point),
}

impl InputEvent {
    /// Convert an `rdev` event. Returns `None` for events no trigger can use
    /// (button releases, horizontal or zero scrolls).
    ///
    /// ```
    /// use screen_translate::trigger::{InputEvent, ScrollDirection};
    ///
    /// let ev = rdev::EventType::Wheel { delta_x: 0, delta_y: -1 };
    /// assert_eq!(InputEvent::from_rdev(&ev), Some(InputEvent::Scroll(ScrollDirection::Down)));
    /// ```
    pub fn from_rdev(event: &rdev::EventType) -> Option<Self> {
        use rdev::EventType;

        match *event {
            EventType::KeyPress(k) => Some(InputEvent::KeyDown(k)),
            EventType::KeyRelease(k) => Some(InputEvent::KeyUp(k)),
            EventType::ButtonPress(b) => Some(InputEvent::Click(b)),
            EventType::ButtonRelease(_) => None,
            EventType::Wheel { delta_y, .. } if delta_y > 0 => Some(InputEvent::Scroll(ScrollDirection::Up)),
            EventType::Wheel { delta_y, .. } if delta_y < 0 => Some(InputEvent::Scroll(ScrollDirection::Down)),
            EventType::Wheel { .. } => None,
            EventType::MouseMove { x, y } => Some(InputEvent::Move(Point::new(x.round() as i32, y.round() as i32))),
        }
    }
}

// ---------------------------------------------------------------------------
// TriggerBinding
// ---------------------------------------------------------------------------

/// A learned word-translation trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerBinding {
    Key(Key),
    Mouse(Button),
    Scroll(ScrollDirection),
}

impl TriggerBinding {
    /// The binding an event would create if observed while learning.
    pub fn from_event(event: &InputEvent) -> Option<Self> {
        match *event {
            InputEvent::KeyDown(k) => Some(TriggerBinding::Key(k)),
            InputEvent::Click(b) => Some(TriggerBinding::Mouse(b)),
            InputEvent::Scroll(d) => Some(TriggerBinding::Scroll(d)),
            InputEvent::KeyUp(_) | InputEvent::Move(_) => None,
        }
    }

    /// `true` when `event` fires this binding.
    pub fn matches(&self, event: &InputEvent) -> bool {
        TriggerBinding::from_event(event).as_ref() == Some(self)
    }
}

impl fmt::Display for TriggerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerBinding::Key(k) => write!(f, "key_{k:?}"),
            TriggerBinding::Mouse(Button::Left) => f.write_str("mouse_left"),
            TriggerBinding::Mouse(Button::Right) => f.write_str("mouse_right"),
            TriggerBinding::Mouse(Button::Middle) => f.write_str("mouse_middle"),
            TriggerBinding::Mouse(Button::Unknown(n)) => write!(f, "mouse_button_{n}"),
            TriggerBinding::Scroll(ScrollDirection::Up) => f.write_str("mouse_scroll_up"),
            TriggerBinding::Scroll(ScrollDirection::Down) => f.write_str("mouse_scroll_down"),
        }
    }
}

// ---------------------------------------------------------------------------
// TriggerKeys
// ---------------------------------------------------------------------------

/// The built-in keys, resolved from [`HotkeyConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerKeys {
    pub region: Key,
    pub word: Key,
    pub learn: [Key; 2],
    pub cancel: Key,
}

impl Default for TriggerKeys {
    fn default() -> Self {
        Self {
            region: Key::Quote,
            word: Key::F8,
            learn: [Key::ControlLeft, Key::F9],
            cancel: Key::Escape,
        }
    }
}

impl TriggerKeys {
    /// Resolve key names; unknown names keep the default and log a warning.
    pub fn from_config(config: &HotkeyConfig) -> Self {
        let defaults = Self::default();
        let resolve = |name: &str, fallback: Key| {
            parse_key(name).unwrap_or_else(|| {
                log::warn!("hotkey: unknown key {name:?}, using {fallback:?}");
                fallback
            })
        };

        Self {
            region: resolve(&config.region_key, defaults.region),
            word: resolve(&config.word_key, defaults.word),
            learn: [
                resolve(&config.learn_combo[0], defaults.learn[0]),
                resolve(&config.learn_combo[1], defaults.learn[1]),
            ],
            cancel: resolve(&config.cancel_key, defaults.cancel),
        }
    }
}

// ---------------------------------------------------------------------------
// parse_key
// ---------------------------------------------------------------------------

/// Parse a key name from a config string into an [`rdev::Key`].
///
/// Supports F1–F12, modifiers, punctuation, common named keys, and single
/// uppercase or lowercase ASCII letters.
///
/// Returns `None` for unrecognised names so callers can fall back to a
/// default.
///
/// # Examples
///
/// ```
/// use screen_translate::trigger::parse_key;
///
/// assert_eq!(parse_key("F8"),     Some(rdev::Key::F8));
/// assert_eq!(parse_key("Quote"),  Some(rdev::Key::Quote));
/// assert_eq!(parse_key("Ctrl"),   Some(rdev::Key::ControlLeft));
/// assert_eq!(parse_key("a"),      Some(rdev::Key::KeyA));
/// assert_eq!(parse_key("xyz"),    None);
/// ```
pub fn parse_key(key_str: &str) -> Option<Key> {
    match key_str {
        // Function keys
        "F1" => Some(Key::F1),
        "F2" => Some(Key::F2),
        "F3" => Some(Key::F3),
        "F4" => Some(Key::F4),
        "F5" => Some(Key::F5),
        "F6" => Some(Key::F6),
        "F7" => Some(Key::F7),
        "F8" => Some(Key::F8),
        "F9" => Some(Key::F9),
        "F10" => Some(Key::F10),
        "F11" => Some(Key::F11),
        "F12" => Some(Key::F12),

        // Modifiers
        "ControlLeft" | "Ctrl" | "Control" => Some(Key::ControlLeft),
        "ControlRight" => Some(Key::ControlRight),
        "ShiftLeft" | "Shift" => Some(Key::ShiftLeft),
        "ShiftRight" => Some(Key::ShiftRight),
        "Alt" => Some(Key::Alt),
        "AltGr" => Some(Key::AltGr),
        "MetaLeft" | "Meta" | "Super" => Some(Key::MetaLeft),

        // Punctuation
        "Quote" | "'" | "\"" => Some(Key::Quote),
        "BackQuote" | "`" => Some(Key::BackQuote),
        "Comma" | "," => Some(Key::Comma),
        "Dot" | "." => Some(Key::Dot),
        "Slash" | "/" => Some(Key::Slash),
        "SemiColon" | ";" => Some(Key::SemiColon),

        // Navigation / control
        "Escape" | "Esc" => Some(Key::Escape),
        "Space" => Some(Key::Space),
        "Return" | "Enter" => Some(Key::Return),
        "Tab" => Some(Key::Tab),
        "Backspace" => Some(Key::Backspace),
        "Delete" | "Del" => Some(Key::Delete),
        "Insert" => Some(Key::Insert),
        "Home" => Some(Key::Home),
        "End" => Some(Key::End),
        "PageUp" => Some(Key::PageUp),
        "PageDown" => Some(Key::PageDown),
        "UpArrow" | "Up" => Some(Key::UpArrow),
        "DownArrow" | "Down" => Some(Key::DownArrow),
        "LeftArrow" | "Left" => Some(Key::LeftArrow),
        "RightArrow" | "Right" => Some(Key::RightArrow),

        // Lock / special
        "CapsLock" => Some(Key::CapsLock),
        "NumLock" => Some(Key::NumLock),
        "ScrollLock" => Some(Key::ScrollLock),
        "PrintScreen" => Some(Key::PrintScreen),
        "Pause" => Some(Key::Pause),

        // Letter keys (case-insensitive)
        "A" | "a" => Some(Key::KeyA),
        "B" | "b" => Some(Key::KeyB),
        "C" | "c" => Some(Key::KeyC),
        "D" | "d" => Some(Key::KeyD),
        "E" | "e" => Some(Key::KeyE),
        "F" | "f" => Some(Key::KeyF),
        "G" | "g" => Some(Key::KeyG),
        "H" | "h" => Some(Key::KeyH),
        "I" | "i" => Some(Key::KeyI),
        "J" | "j" => Some(Key::KeyJ),
        "K" | "k" => Some(Key::KeyK),
        "L" | "l" => Some(Key::KeyL),
        "M" | "m" => Some(Key::KeyM),
        "N" | "n" => Some(Key::KeyN),
        "O" | "o" => Some(Key::KeyO),
        "P" | "p" => Some(Key::KeyP),
        "Q" | "q" => Some(Key::KeyQ),
        "R" | "r" => Some(Key::KeyR),
        "S" | "s" => Some(Key::KeyS),
        "T" | "t" => Some(Key::KeyT),
        "U" | "u" => Some(Key::KeyU),
        "V" | "v" => Some(Key::KeyV),
        "W" | "w" => Some(Key::KeyW),
        "X" | "x" => Some(Key::KeyX),
        "Y" | "y" => Some(Key::KeyY),
        "Z" | "z" => Some(Key::KeyZ),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_function_keys() {
        assert_eq!(parse_key("F8"), Some(Key::F8));
        assert_eq!(parse_key("F1"), Some(Key::F1));
        assert_eq!(parse_key("F12"), Some(Key::F12));
    }

    #[test]
    fn parse_named_and_modifier_keys() {
        assert_eq!(parse_key("Escape"), Some(Key::Escape));
        assert_eq!(parse_key("Esc"), Some(Key::Escape));
        assert_eq!(parse_key("Quote"), Some(Key::Quote));
        assert_eq!(parse_key("\""), Some(Key::Quote));
        assert_eq!(parse_key("ControlLeft"), Some(Key::ControlLeft));
        assert_eq!(parse_key("Ctrl"), Some(Key::ControlLeft));
    }

    #[test]
    fn parse_letter_keys_case_insensitive() {
        assert_eq!(parse_key("A"), Some(Key::KeyA));
        assert_eq!(parse_key("a"), Some(Key::KeyA));
        assert_eq!(parse_key("z"), Some(Key::KeyZ));
    }

    #[test]
    fn parse_unknown_key_returns_none() {
        assert_eq!(parse_key("xyz"), None);
        assert_eq!(parse_key(""), None);
        assert_eq!(parse_key("Ctrl+V"), None);
    }

    #[test]
    fn trigger_keys_fall_back_per_key() {
        let config = HotkeyConfig {
            region_key: "nonsense".into(),
            word_key: "F2".into(),
            ..HotkeyConfig::default()
        };
        let keys = TriggerKeys::from_config(&config);
        assert_eq!(keys.region, Key::Quote);
        assert_eq!(keys.word, Key::F2);
        assert_eq!(keys, TriggerKeys { word: Key::F2, ..TriggerKeys::default() });
    }

    #[test]
    fn binding_names() {
        assert_eq!(TriggerBinding::Scroll(ScrollDirection::Down).to_string(), "mouse_scroll_down");
        assert_eq!(TriggerBinding::Scroll(ScrollDirection::Up).to_string(), "mouse_scroll_up");
        assert_eq!(TriggerBinding::Mouse(Button::Middle).to_string(), "mouse_middle");
        assert_eq!(TriggerBinding::Key(Key::F2).to_string(), "key_F2");
    }

    #[test]
    fn binding_matches_only_its_own_kind() {
        let b = TriggerBinding::Mouse(Button::Right);
        assert!(b.matches(&InputEvent::Click(Button::Right)));
        assert!(!b.matches(&InputEvent::Click(Button::Left)));
        assert!(!b.matches(&InputEvent::Scroll(ScrollDirection::Up)));

        let k = TriggerBinding::Key(Key::KeyT);
        assert!(k.matches(&InputEvent::KeyDown(Key::KeyT)));
        assert!(!k.matches(&InputEvent::KeyUp(Key::KeyT)));
    }

    #[test]
    fn rdev_conversion() {
        use rdev::EventType;

        assert_eq!(
            InputEvent::from_rdev(&EventType::Wheel { delta_x: 0, delta_y: 2 }),
            Some(InputEvent::Scroll(ScrollDirection::Up))
        );
        assert_eq!(InputEvent::from_rdev(&EventType::Wheel { delta_x: 3, delta_y: 0 }), None);
        assert_eq!(InputEvent::from_rdev(&EventType::ButtonRelease(Button::Left)), None);
        assert_eq!(
            InputEvent::from_rdev(&EventType::MouseMove { x: 10.6, y: 3.2 }),
            Some(InputEvent::Move(Point::new(11, 3)))
        );
    }
}
