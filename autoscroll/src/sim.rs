//! A self-contained host for driving the controller without a windowing system.
//!
//! [`Simulation`] owns a manual clock, a timer queue and a single scroll pane placed in a
//! rectangular region of the screen. Time only moves when [`Simulation::advance`] is
//! called, which fires every timer that falls due in deadline order. The `autoscroll`
//! binary replays recorded traces through it, and the integration tests use it to
//! check end-to-end scroll distances.

use crate::{
    clock::{Clock, ManualClock, TimerQueue},
    controller::AutoscrollController,
    cursor::CursorShape,
    input::{InputEvent, Point},
    settings::{Settings, SharedSettings},
    target::{ScrollBar, ScrollPane, ScrollPaneTarget, ScrollTarget, TargetId, WindowId},
};
use std::{cell::RefCell, rc::Rc, time::Duration};

pub const PANE_ID: TargetId = TargetId(1);
pub const WINDOW_ID: WindowId = WindowId(1);

/// Screen rectangle covered by the simulated pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub origin: Point,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub const fn new(origin: Point, width: i32, height: i32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        let local = point - self.origin;
        (0..self.width).contains(&local.x) && (0..self.height).contains(&local.y)
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::new(Point::new(0, 0), 1920, 1080)
    }
}

pub struct Simulation {
    clock: ManualClock,
    timers: TimerQueue,
    settings: SharedSettings,
    pane: Rc<RefCell<ScrollPane>>,
    controller: AutoscrollController,
    ticks: u64,
}

impl Simulation {
    /// A running controller over a pane scrollable by `max_scroll` on both axes.
    pub fn new(settings: Settings, region: Region, max_scroll: i32) -> Self {
        let pane = ScrollPane::new(
            Some(ScrollBar::new(max_scroll)),
            Some(ScrollBar::new(max_scroll)),
        );
        Self::with_pane(settings, region, pane)
    }

    pub fn with_pane(settings: Settings, region: Region, pane: ScrollPane) -> Self {
        let clock = ManualClock::new();
        let timers = TimerQueue::new(Rc::new(clock.clone()));
        let settings = SharedSettings::new(settings.normalized());
        let pane = Rc::new(RefCell::new(pane));

        let resolver_pane = pane.clone();
        let resolver = move |point: Point| -> Option<Box<dyn ScrollTarget>> {
            if !region.contains(point) {
                return None;
            }
            let target = ScrollPaneTarget::new(PANE_ID, resolver_pane.clone())
                .with_window(WINDOW_ID)
                .with_origin(region.origin);
            Some(Box::new(target))
        };

        let mut controller = AutoscrollController::new(
            settings.clone(),
            resolver,
            Rc::new(clock.clone()),
            timers.clone(),
        );
        controller.start();

        Self {
            clock,
            timers,
            settings,
            pane,
            controller,
            ticks: 0,
        }
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Offer `event` to the controller at the current time.
    pub fn dispatch(&mut self, event: &InputEvent) -> bool {
        self.controller.dispatch(event)
    }

    /// Move time forward by `by`, firing every timer that falls due on the way.
    pub fn advance(&mut self, by: Duration) {
        self.advance_to(self.clock.now() + by);
    }

    /// Move time forward to `at`. Times in the past are ignored.
    pub fn advance_to(&mut self, at: Duration) {
        while let Some(deadline) = self.timers.next_deadline().filter(|d| *d <= at) {
            self.clock.set(deadline.max(self.clock.now()));
            while let Some(timer) = self.timers.pop_due(self.clock.now()) {
                if self.controller.fire_timer(timer) {
                    self.ticks += 1;
                }
            }
        }
        if at > self.clock.now() {
            self.clock.set(at);
        }
    }

    /// Timers delivered to a live gesture so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn offsets(&self) -> Point {
        self.pane.borrow().offsets()
    }

    pub fn cursor(&self) -> Option<CursorShape> {
        self.pane.borrow().cursor
    }

    pub fn is_active(&self) -> bool {
        self.controller.is_active()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn controller(&self) -> &AutoscrollController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut AutoscrollController {
        &mut self.controller
    }

    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    /// The pane was hidden by the host.
    pub fn hide(&mut self) -> bool {
        self.controller.notify_target_hidden(PANE_ID)
    }

    /// The pane's window lost focus.
    pub fn blur(&mut self) -> bool {
        self.controller.notify_window_focus_lost(WINDOW_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;

    #[test]
    fn region_is_half_open() {
        let region = Region::new(Point::new(10, 10), 100, 50);
        assert!(region.contains(Point::new(10, 10)));
        assert!(region.contains(Point::new(109, 59)));
        assert!(!region.contains(Point::new(110, 20)));
        assert!(!region.contains(Point::new(9, 20)));
    }

    #[test]
    fn advance_fires_ticks_in_order() {
        let mut sim = Simulation::new(Settings::default(), Region::default(), 10_000);
        sim.dispatch(&InputEvent::press(MouseButton::Middle, Point::new(100, 100)));
        sim.advance(Duration::from_millis(95));
        assert_eq!(sim.ticks(), 9);
        assert_eq!(sim.now(), Duration::from_millis(95));
        assert_eq!(sim.pending_timers(), 1);

        sim.advance_to(Duration::from_millis(50));
        assert_eq!(sim.now(), Duration::from_millis(95));
    }

    #[test]
    fn pane_origin_is_respected() {
        let region = Region::new(Point::new(500, 500), 200, 200);
        let mut sim = Simulation::new(Settings::default(), region, 10_000);
        assert!(!sim.dispatch(&InputEvent::press(MouseButton::Middle, Point::new(100, 100))));
        assert!(!sim.is_active());
        assert!(sim.dispatch(&InputEvent::press(MouseButton::Middle, Point::new(550, 550))));
        assert!(sim.is_active());
    }
}
