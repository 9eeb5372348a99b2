//! Fast mouse scrolling for editor views.
//!
//! Press the middle button over a scrollable view and move away from the press point: the
//! view scrolls at a speed that grows with the distance, and the cursor shows the
//! direction. Releasing quickly enters toggle mode, which keeps scrolling until the next
//! click. Escape, any other mouse press, hiding the view or focus loss ends the gesture.
//!
//! The crate is host-agnostic. A host provides:
//!
//! - a [`Clock`] and a [`Scheduler`] for one-shot timers, calling
//!   [`AutoscrollController::fire_timer`] when one fires,
//! - a [`TargetResolver`] that finds the [`ScrollTarget`] under a screen point,
//! - a [`SettingsSource`] with the user's current [`Settings`].
//!
//! Every input event then goes through [`AutoscrollController::dispatch`] before the host's
//! own handling. Everything runs on the host's UI thread.

mod accumulator;
mod binding;
mod clock;
mod controller;
mod cursor;
mod error;
mod gesture;
mod input;
mod mode;
mod settings;
pub mod sim;
pub mod speed;
mod target;

pub use accumulator::AxisDelta;
pub use binding::ActivationBinding;
pub use clock::{Clock, ManualClock, Scheduler, SystemClock, TimerId, TimerQueue};
pub use controller::{AutoscrollController, TOGGLE_RELEASE_GRACE};
pub use cursor::CursorShape;
pub use error::ParseError;
pub use gesture::{GestureConfig, GestureHandler, GestureState, PanGesture, ScrollGesture};
pub use input::{keys, InputEvent, InputEventKind, Modifiers, MouseButton, MouseEventKind, Point};
pub use mode::{GestureKind, ScrollMode};
pub use settings::{Settings, SettingsSource, SharedSettings, MAX_DELAY_MS, MIN_DELAY_MS};
pub use speed::{GeckoSpeed, QuadraticSpeed, ScrollSpeed, SpeedAlgorithm};
pub use target::{
    OffsetTarget, ScrollBar, ScrollOffsets, ScrollPane, ScrollPaneTarget, ScrollTarget, TargetId,
    TargetResolver, WindowId,
};
