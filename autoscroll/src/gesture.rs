//! Lifetime of one scroll gesture, from the activation press until disposal.
//!
//! A [`GestureHandler`] moves through [`GestureState::Idle`] → [`GestureState::Active`] →
//! [`GestureState::Disposed`] exactly once. Every operation checks the state on entry, so
//! a stale call on a disposed handler (a late timer, a move racing a cancel) does nothing.
//!
//! Two handlers exist:
//!
//! - [`ScrollGesture`] holds a velocity per axis derived from the cursor's distance to the
//!   start point and advances the target on a self re-arming tick.
//! - [`PanGesture`] moves the target 1:1 with the cursor on every move event, with no
//!   ticking at all.

use crate::{
    accumulator::AxisDelta,
    clock::{Scheduler, TimerId},
    cursor::CursorShape,
    input::Point,
    mode::{GestureKind, ScrollMode},
    settings::Settings,
    speed::{ScrollSpeed, SpeedAlgorithm},
    target::{ScrollTarget, TargetId, WindowId},
};
use std::time::Duration;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Active,
    Disposed,
}

/// Settings captured when a gesture starts. Later settings edits do not affect it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub mode: ScrollMode,
    pub kind: GestureKind,
    pub tick_interval: Duration,
    pub speed: SpeedAlgorithm,
    pub display_scale: f32,
}

impl From<&Settings> for GestureConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            mode: settings.scroll_mode,
            kind: settings.gesture,
            tick_interval: settings.tick_interval(),
            speed: settings.speed,
            display_scale: settings.display_scale,
        }
    }
}

/// Velocity-driven "hold and move" scrolling.
pub struct ScrollGesture {
    target: Box<dyn ScrollTarget>,
    config: GestureConfig,
    curve: Box<dyn ScrollSpeed>,
    state: GestureState,
    started_at: Duration,
    /// Cursor position at the press, in target coordinates.
    start_point: Point,
    x: AxisDelta,
    y: AxisDelta,
    /// Time of the last applied step, `None` while both axes are idle.
    last_tick: Option<Duration>,
    pending_tick: Option<TimerId>,
    was_moved: bool,
}

impl ScrollGesture {
    pub fn new(
        target: Box<dyn ScrollTarget>,
        press: Point,
        now: Duration,
        config: GestureConfig,
    ) -> Self {
        let start_point = target.to_local(press);
        Self {
            curve: config.speed.curve(config.display_scale),
            target,
            config,
            state: GestureState::Idle,
            started_at: now,
            start_point,
            x: AxisDelta::new(),
            y: AxisDelta::new(),
            last_tick: None,
            pending_tick: None,
            was_moved: false,
        }
    }

    pub fn start(&mut self, scheduler: &mut dyn Scheduler) {
        if self.state != GestureState::Idle {
            return;
        }
        self.state = GestureState::Active;
        self.target.set_cursor(Some(CursorShape::Move));
        self.schedule_tick(scheduler);
    }

    pub fn mouse_moved(&mut self, screen: Point, now: Duration) {
        if self.state != GestureState::Active {
            return;
        }

        let offset = self.target.to_local(screen) - self.start_point;
        let velocity_x = self.axis_speed(offset.x, self.config.mode.horizontal());
        let velocity_y = self.axis_speed(offset.y, self.config.mode.vertical());
        self.x.set_velocity(velocity_x);
        self.y.set_velocity(velocity_y);

        let is_active = self.is_scrolling();
        let was_active = self.last_tick.is_some();
        if is_active != was_active {
            self.last_tick = is_active.then_some(now);
        }

        if velocity_x != 0.0 || velocity_y != 0.0 {
            self.was_moved = true;
        }

        trace!(
            dx = offset.x,
            dy = offset.y,
            velocity_x,
            velocity_y,
            "Autoscroll velocity"
        );
        self.target
            .set_cursor(Some(CursorShape::for_velocity(velocity_x, velocity_y)));
    }

    /// Run one scroll step if `timer` is this gesture's pending tick, then re-arm.
    ///
    /// Returns `false` for timers this gesture does not own.
    pub fn fire_timer(
        &mut self,
        timer: TimerId,
        now: Duration,
        scheduler: &mut dyn Scheduler,
    ) -> bool {
        if self.state != GestureState::Active || self.pending_tick != Some(timer) {
            return false;
        }
        self.pending_tick = None;

        if self.is_scrolling() {
            let elapsed = now.saturating_sub(self.last_tick.unwrap_or(now));
            self.last_tick = Some(now);

            let step_x = self.x.step(elapsed);
            let step_y = self.y.step(elapsed);
            trace!(?elapsed, step_x, step_y, "Autoscroll step");
            self.target.apply_delta(step_x, step_y);
        }

        self.schedule_tick(scheduler);
        true
    }

    pub fn dispose(&mut self, scheduler: &mut dyn Scheduler) {
        if self.state == GestureState::Disposed {
            return;
        }
        self.state = GestureState::Disposed;
        self.target.set_cursor(None);
        if let Some(timer) = self.pending_tick.take() {
            scheduler.cancel(timer);
        }
    }

    pub fn velocity(&self) -> (f64, f64) {
        (self.x.velocity(), self.y.velocity())
    }

    pub fn remainders(&self) -> (f64, f64) {
        (self.x.remainder(), self.y.remainder())
    }

    pub fn pending_tick(&self) -> Option<TimerId> {
        self.pending_tick
    }

    fn is_scrolling(&self) -> bool {
        self.x.is_active() || self.y.is_active()
    }

    fn axis_speed(&self, delta: i32, enabled: bool) -> f64 {
        if !enabled {
            return 0.0;
        }
        self.curve.speed(delta)
    }

    fn schedule_tick(&mut self, scheduler: &mut dyn Scheduler) {
        self.pending_tick = Some(scheduler.schedule(self.config.tick_interval));
    }
}

/// Direct 1:1 "drag to pan" with no velocity or ticking.
pub struct PanGesture {
    target: Box<dyn ScrollTarget>,
    mode: ScrollMode,
    state: GestureState,
    started_at: Duration,
    /// Cursor position at the previous event, in target coordinates.
    last_point: Point,
    was_moved: bool,
}

impl PanGesture {
    pub fn new(
        target: Box<dyn ScrollTarget>,
        press: Point,
        now: Duration,
        mode: ScrollMode,
    ) -> Self {
        let last_point = target.to_local(press);
        Self {
            target,
            mode,
            state: GestureState::Idle,
            started_at: now,
            last_point,
            was_moved: false,
        }
    }

    pub fn start(&mut self) {
        if self.state != GestureState::Idle {
            return;
        }
        self.state = GestureState::Active;
        self.target.set_cursor(Some(CursorShape::Move));
    }

    pub fn mouse_moved(&mut self, screen: Point) {
        if self.state != GestureState::Active {
            return;
        }

        let point = self.target.to_local(screen);
        let delta = point - self.last_point;
        self.last_point = point;

        let dx = if self.mode.horizontal() { delta.x } else { 0 };
        let dy = if self.mode.vertical() { delta.y } else { 0 };
        if dx != 0 || dy != 0 {
            self.was_moved = true;
            trace!(dx, dy, "Pan step");
            self.target.apply_delta(dx, dy);
        }
    }

    pub fn dispose(&mut self) {
        if self.state == GestureState::Disposed {
            return;
        }
        self.state = GestureState::Disposed;
        self.target.set_cursor(None);
    }
}

/// The single live gesture owned by the controller.
pub enum GestureHandler {
    Scroll(ScrollGesture),
    Pan(PanGesture),
}

impl GestureHandler {
    /// Build the handler selected by `config.kind`, bound to `target`.
    pub fn new(
        target: Box<dyn ScrollTarget>,
        press: Point,
        now: Duration,
        config: GestureConfig,
    ) -> Self {
        match config.kind {
            GestureKind::Autoscroll => {
                GestureHandler::Scroll(ScrollGesture::new(target, press, now, config))
            },
            GestureKind::Pan => {
                GestureHandler::Pan(PanGesture::new(target, press, now, config.mode))
            },
        }
    }

    pub fn start(&mut self, scheduler: &mut dyn Scheduler) {
        debug!(
            target_id = ?self.target_id(),
            kind = ?self.kind(),
            "Starting gesture"
        );
        match self {
            GestureHandler::Scroll(gesture) => gesture.start(scheduler),
            GestureHandler::Pan(gesture) => gesture.start(),
        }
    }

    pub fn mouse_moved(&mut self, screen: Point, now: Duration) {
        match self {
            GestureHandler::Scroll(gesture) => gesture.mouse_moved(screen, now),
            GestureHandler::Pan(gesture) => gesture.mouse_moved(screen),
        }
    }

    pub fn fire_timer(
        &mut self,
        timer: TimerId,
        now: Duration,
        scheduler: &mut dyn Scheduler,
    ) -> bool {
        match self {
            GestureHandler::Scroll(gesture) => gesture.fire_timer(timer, now, scheduler),
            GestureHandler::Pan(_) => false,
        }
    }

    pub fn dispose(&mut self, scheduler: &mut dyn Scheduler) {
        if self.is_disposed() {
            return;
        }
        debug!(target_id = ?self.target_id(), was_moved = self.was_moved(), "Disposing gesture");
        match self {
            GestureHandler::Scroll(gesture) => gesture.dispose(scheduler),
            GestureHandler::Pan(gesture) => gesture.dispose(),
        }
    }

    pub fn kind(&self) -> GestureKind {
        match self {
            GestureHandler::Scroll(_) => GestureKind::Autoscroll,
            GestureHandler::Pan(_) => GestureKind::Pan,
        }
    }

    pub fn state(&self) -> GestureState {
        match self {
            GestureHandler::Scroll(gesture) => gesture.state,
            GestureHandler::Pan(gesture) => gesture.state,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.state() == GestureState::Disposed
    }

    pub fn was_moved(&self) -> bool {
        match self {
            GestureHandler::Scroll(gesture) => gesture.was_moved,
            GestureHandler::Pan(gesture) => gesture.was_moved,
        }
    }

    pub fn started_at(&self) -> Duration {
        match self {
            GestureHandler::Scroll(gesture) => gesture.started_at,
            GestureHandler::Pan(gesture) => gesture.started_at,
        }
    }

    fn target(&self) -> &dyn ScrollTarget {
        match self {
            GestureHandler::Scroll(gesture) => gesture.target.as_ref(),
            GestureHandler::Pan(gesture) => gesture.target.as_ref(),
        }
    }

    pub fn target_id(&self) -> TargetId {
        self.target().id()
    }

    pub fn window(&self) -> Option<WindowId> {
        self.target().window()
    }

    pub fn as_scroll(&self) -> Option<&ScrollGesture> {
        match self {
            GestureHandler::Scroll(gesture) => Some(gesture),
            GestureHandler::Pan(_) => None,
        }
    }
}
