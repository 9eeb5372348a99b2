//! The global input interceptor.
//!
//! The host offers every input event to [`AutoscrollController::dispatch`] before its own
//! handling. The controller classifies the event, starts and ends the single live
//! [`GestureHandler`], and answers whether the event was consumed.
//!
//! # Consumption
//!
//! | Event | Consumed when |
//! |---|---|
//! | activation press | it ended a gesture, or started one with toggle mode on |
//! | activation release | toggle mode is on, or the gesture scrolled while held |
//! | other activation events (click) | a gesture or a target under the cursor exists |
//! | Escape, any other press | it ended a gesture |
//! | drag | a gesture is live |
//! | move | never, so hover feedback elsewhere keeps working |
//!
//! # Lifecycle
//!
//! A controller is created stopped. [`AutoscrollController::start`] wires it into dispatch
//! and [`AutoscrollController::stop`] unwires it, ending any live gesture. While stopped,
//! or while the scroll mode is [`ScrollMode::Disabled`](crate::ScrollMode::Disabled), every
//! event passes through untouched.

use crate::{
    clock::{Clock, Scheduler, TimerId},
    gesture::{GestureConfig, GestureHandler},
    input::{InputEvent, InputEventKind, MouseEventKind},
    settings::{Settings, SettingsSource},
    target::{TargetId, TargetResolver, WindowId},
};
use std::{rc::Rc, time::Duration};
use tracing::debug;

/// How long after the press a release still counts as a click that enters toggle mode.
pub const TOGGLE_RELEASE_GRACE: Duration = Duration::from_millis(300);

pub struct AutoscrollController {
    settings: Box<dyn SettingsSource>,
    resolver: Box<dyn TargetResolver>,
    clock: Rc<dyn Clock>,
    scheduler: Box<dyn Scheduler>,
    handler: Option<GestureHandler>,
    running: bool,
}

impl AutoscrollController {
    pub fn new(
        settings: impl SettingsSource + 'static,
        resolver: impl TargetResolver + 'static,
        clock: Rc<dyn Clock>,
        scheduler: impl Scheduler + 'static,
    ) -> Self {
        Self {
            settings: Box::new(settings),
            resolver: Box::new(resolver),
            clock,
            scheduler: Box::new(scheduler),
            handler: None,
            running: false,
        }
    }

    /// Start intercepting input. Calling it again is a no-op.
    pub fn start(&mut self) {
        if !self.running {
            debug!("Autoscroll interceptor started");
        }
        self.running = true;
    }

    /// Stop intercepting input, ending any live gesture.
    pub fn stop(&mut self) {
        self.dispose_handler("interceptor stopped");
        if self.running {
            debug!("Autoscroll interceptor stopped");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_active(&self) -> bool {
        self.handler.is_some()
    }

    pub fn gesture(&self) -> Option<&GestureHandler> {
        self.handler.as_ref()
    }

    /// Offer an input event. Returns `true` if the host must not handle it further.
    pub fn dispatch(&mut self, event: &InputEvent) -> bool {
        if event.consumed || !self.running {
            return false;
        }

        let settings = self.settings.settings();
        if !settings.scroll_mode.is_enabled() {
            self.dispose_handler("scrolling disabled");
            return false;
        }

        if settings.activation.matches(event) {
            return self.on_activation_event(event, &settings);
        }

        if event.is_escape_down() {
            return self.dispose_handler("escape");
        }

        if event.is_mouse_press() {
            return self.dispose_handler("other mouse press");
        }

        if let InputEventKind::Mouse(kind @ (MouseEventKind::Move | MouseEventKind::Drag)) =
            &event.kind
        {
            if let Some(handler) = self.handler.as_mut() {
                handler.mouse_moved(event.position, self.clock.now());
                return *kind == MouseEventKind::Drag;
            }
        }

        false
    }

    /// Deliver a fired one-shot timer to the live gesture.
    ///
    /// Timers that belong to no live gesture are ignored.
    pub fn fire_timer(&mut self, timer: TimerId) -> bool {
        let now = self.clock.now();
        match self.handler.as_mut() {
            Some(handler) => handler.fire_timer(timer, now, self.scheduler.as_mut()),
            None => false,
        }
    }

    /// The view `target` was hidden. Ends the gesture if it is bound to that view.
    pub fn notify_target_hidden(&mut self, target: TargetId) -> bool {
        if self.handler.as_ref().map(GestureHandler::target_id) != Some(target) {
            return false;
        }
        self.dispose_handler("target hidden")
    }

    /// `window` lost focus. Ends the gesture if its target lives in that window.
    pub fn notify_window_focus_lost(&mut self, window: WindowId) -> bool {
        match self.handler.as_ref().and_then(GestureHandler::window) {
            Some(current) if current == window => self.dispose_handler("window focus lost"),
            _ => false,
        }
    }

    fn on_activation_event(&mut self, event: &InputEvent, settings: &Settings) -> bool {
        let toggle = settings.click_to_drag_toggle;
        let now = self.clock.now();

        let target = match self.handler {
            Some(_) => None,
            None => match self.resolver.resolve(event.position) {
                Some(target) => Some(target),
                None => return false,
            },
        };

        match &event.kind {
            InputEventKind::Mouse(MouseEventKind::Press(_)) => {
                if self.dispose_handler("second activation press") {
                    return true;
                }
                if let Some(target) = target {
                    let config = GestureConfig::from(settings);
                    self.install_handler(GestureHandler::new(target, event.position, now, config));
                }
                toggle
            },
            InputEventKind::Mouse(MouseEventKind::Release(_)) => {
                let Some(handler) = self.handler.as_ref() else {
                    return toggle;
                };
                let was_moved = handler.was_moved();
                let held_for = now.saturating_sub(handler.started_at());
                if held_for > TOGGLE_RELEASE_GRACE || !toggle {
                    self.dispose_handler("activation release");
                } else {
                    debug!(?held_for, "Entering click-to-scroll toggle mode");
                }
                toggle || was_moved
            },
            // Clicks and anything else carrying the activation button would otherwise
            // trigger host shortcuts bound to it.
            _ => true,
        }
    }

    fn install_handler(&mut self, mut handler: GestureHandler) {
        self.dispose_handler("replaced by new gesture");
        handler.start(self.scheduler.as_mut());
        self.handler = Some(handler);
    }

    fn dispose_handler(&mut self, reason: &str) -> bool {
        let Some(mut handler) = self.handler.take() else {
            return false;
        };
        debug!(reason, "Ending gesture");
        handler.dispose(self.scheduler.as_mut());
        true
    }
}
