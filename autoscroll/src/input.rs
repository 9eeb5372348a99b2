//! Input event types seen by the autoscroll interceptor.
//!
//! The host translates its native events into [`InputEvent`] before handing them to
//! [`AutoscrollController::dispatch`](crate::AutoscrollController::dispatch). Coordinates are
//! already in the host's logical pixel space; no DPI handling happens here.

use crate::error::ParseError;
use std::{fmt, ops::Sub, str::FromStr};

/// A point in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Point;

    /// Saturates at the `i32` range instead of wrapping.
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Back,
    Forward,
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MouseButton::Left => "left",
            MouseButton::Middle => "middle",
            MouseButton::Right => "right",
            MouseButton::Back => "back",
            MouseButton::Forward => "forward",
        };
        f.write_str(name)
    }
}

impl FromStr for MouseButton {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "button1" => Ok(MouseButton::Left),
            "middle" | "button2" => Ok(MouseButton::Middle),
            "right" | "button3" => Ok(MouseButton::Right),
            "back" | "button4" => Ok(MouseButton::Back),
            "forward" | "button5" => Ok(MouseButton::Forward),
            _ => Err(ParseError::UnknownButton(s.to_string())),
        }
    }
}

/// Keyboard modifier state at the time of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub control: bool,
    pub alt: bool,
    pub shift: bool,
    /// Command on macOS, the Windows key elsewhere.
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        control: false,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Set a modifier by its notation name. Returns `false` for unknown names.
    pub(crate) fn set_named(&mut self, name: &str) -> bool {
        match name.to_lowercase().as_str() {
            "ctrl" | "control" => self.control = true,
            "alt" | "option" => self.alt = true,
            "shift" => self.shift = true,
            "meta" | "cmd" | "super" => self.meta = true,
            _ => return false,
        }
        true
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.control, "ctrl"),
            (self.alt, "alt"),
            (self.shift, "shift"),
            (self.meta, "meta"),
        ];
        for (_, name) in names.iter().filter(|(set, _)| *set) {
            write!(f, "{name}+")?;
        }
        Ok(())
    }
}

/// Parses a `+`-joined modifier list such as `ctrl+shift`.
impl FromStr for Modifiers {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut modifiers = Modifiers::NONE;
        for part in s.split('+').map(str::trim).filter(|part| !part.is_empty()) {
            if !modifiers.set_named(part) {
                return Err(ParseError::UnknownModifier {
                    binding: s.to_string(),
                    modifier: part.to_string(),
                });
            }
        }
        Ok(modifiers)
    }
}

/// Common key names, matching the host's lowercase string key representation.
pub mod keys {
    pub const ESCAPE: &str = "escape";
    pub const ENTER: &str = "enter";
    pub const SPACE: &str = "space";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MouseEventKind {
    Press(MouseButton),
    Release(MouseButton),
    /// Synthesized by hosts after a press/release pair on the same spot.
    Click(MouseButton),
    Move,
    /// Movement while any button is held.
    Drag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEventKind {
    Mouse(MouseEventKind),
    KeyDown(String),
    KeyUp(String),
}

/// A single input event offered to the interceptor before normal host handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub kind: InputEventKind,
    pub modifiers: Modifiers,
    /// Cursor position in screen coordinates. Key events carry the last known position.
    pub position: Point,
    /// Already handled by an earlier dispatcher; such events are never examined.
    pub consumed: bool,
}

impl InputEvent {
    pub fn new(kind: InputEventKind, position: Point) -> Self {
        Self {
            kind,
            modifiers: Modifiers::NONE,
            position,
            consumed: false,
        }
    }

    pub fn press(button: MouseButton, position: Point) -> Self {
        Self::new(
            InputEventKind::Mouse(MouseEventKind::Press(button)),
            position,
        )
    }

    pub fn release(button: MouseButton, position: Point) -> Self {
        Self::new(
            InputEventKind::Mouse(MouseEventKind::Release(button)),
            position,
        )
    }

    pub fn click(button: MouseButton, position: Point) -> Self {
        Self::new(
            InputEventKind::Mouse(MouseEventKind::Click(button)),
            position,
        )
    }

    pub fn mouse_move(position: Point) -> Self {
        Self::new(InputEventKind::Mouse(MouseEventKind::Move), position)
    }

    pub fn drag(position: Point) -> Self {
        Self::new(InputEventKind::Mouse(MouseEventKind::Drag), position)
    }

    pub fn key_down(key: impl Into<String>) -> Self {
        Self::new(InputEventKind::KeyDown(key.into()), Point::default())
    }

    pub fn key_up(key: impl Into<String>) -> Self {
        Self::new(InputEventKind::KeyUp(key.into()), Point::default())
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn consumed(mut self) -> Self {
        self.consumed = true;
        self
    }

    /// The button this event carries, if it is a press, release or click.
    pub fn button(&self) -> Option<MouseButton> {
        match &self.kind {
            InputEventKind::Mouse(
                MouseEventKind::Press(button)
                | MouseEventKind::Release(button)
                | MouseEventKind::Click(button),
            ) => Some(*button),
            _ => None,
        }
    }

    pub fn is_mouse_press(&self) -> bool {
        matches!(self.kind, InputEventKind::Mouse(MouseEventKind::Press(_)))
    }

    pub fn is_escape_down(&self) -> bool {
        matches!(&self.kind, InputEventKind::KeyDown(key) if key.eq_ignore_ascii_case(keys::ESCAPE))
    }
}
