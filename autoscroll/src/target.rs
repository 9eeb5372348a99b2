//! The scrollable view a gesture drives, and reference adapters for the two view shapes
//! hosts usually have.
//!
//! # Architecture
//!
//! The gesture engine is written once against [`ScrollTarget`]. A host implements
//! [`TargetResolver`] to find the view under the cursor and hands back a boxed adapter.
//! Adapters are handles: they share the underlying view state with the host, so deltas
//! applied through the adapter are visible to the host immediately.
//!
//! - [`ScrollPaneTarget`] drives a [`ScrollPane`] with independent, optionally hidden
//!   scroll bars. A hidden or missing bar silently drops that axis.
//! - [`OffsetTarget`] drives [`ScrollOffsets`], a two-axis offset model scrolled with one
//!   absolute `scroll_to` per step, as an editor scrolling model would be.

use crate::{cursor::CursorShape, input::Point};
use std::{cell::RefCell, rc::Rc};

/// Identity of a scrollable view, used to route hide notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u64);

/// Identity of a top-level window, used to route focus-loss notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

/// Capability interface for a view that fast scrolling can move.
pub trait ScrollTarget {
    fn id(&self) -> TargetId;

    /// Window containing the view, if it is attached to one.
    fn window(&self) -> Option<WindowId> {
        None
    }

    /// Convert a screen position into the view's coordinate space.
    fn to_local(&self, screen: Point) -> Point {
        screen
    }

    /// Scroll by whole pixels, instantly. Must tolerate zero deltas and being called on
    /// every tick.
    fn apply_delta(&mut self, dx: i32, dy: i32);

    /// Show a feedback cursor over the view, or restore its default with `None`.
    fn set_cursor(&mut self, cursor: Option<CursorShape>);
}

/// Finds the scrollable view under a screen position.
pub trait TargetResolver {
    fn resolve(&self, screen: Point) -> Option<Box<dyn ScrollTarget>>;
}

impl<F> TargetResolver for F
where
    F: Fn(Point) -> Option<Box<dyn ScrollTarget>>,
{
    fn resolve(&self, screen: Point) -> Option<Box<dyn ScrollTarget>> {
        self(screen)
    }
}

/// One scroll bar of a [`ScrollPane`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollBar {
    pub value: i32,
    pub min: i32,
    pub max: i32,
    pub visible: bool,
}

impl ScrollBar {
    pub fn new(max: i32) -> Self {
        Self {
            value: 0,
            min: 0,
            max,
            visible: true,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value.clamp(self.min, self.max.max(self.min));
    }
}

/// A scroll container with independent horizontal and vertical bars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollPane {
    pub horizontal: Option<ScrollBar>,
    pub vertical: Option<ScrollBar>,
    /// Feedback cursor most recently set on the pane.
    pub cursor: Option<CursorShape>,
}

impl ScrollPane {
    pub fn new(horizontal: Option<ScrollBar>, vertical: Option<ScrollBar>) -> Self {
        Self {
            horizontal,
            vertical,
            cursor: None,
        }
    }

    /// Current (horizontal, vertical) values, zero for missing bars.
    pub fn offsets(&self) -> Point {
        Point::new(
            self.horizontal.map_or(0, |bar| bar.value),
            self.vertical.map_or(0, |bar| bar.value),
        )
    }
}

fn scroll_bar(bar: &mut Option<ScrollBar>, delta: i32) {
    if let Some(bar) = bar.as_mut().filter(|bar| bar.visible) {
        bar.set_value(bar.value.saturating_add(delta));
    }
}

/// [`ScrollTarget`] handle over a shared [`ScrollPane`].
#[derive(Debug, Clone)]
pub struct ScrollPaneTarget {
    id: TargetId,
    window: Option<WindowId>,
    /// Screen position of the pane's top-left corner.
    origin: Point,
    pane: Rc<RefCell<ScrollPane>>,
}

impl ScrollPaneTarget {
    pub fn new(id: TargetId, pane: Rc<RefCell<ScrollPane>>) -> Self {
        Self {
            id,
            window: None,
            origin: Point::default(),
            pane,
        }
    }

    pub fn with_window(mut self, window: WindowId) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn pane(&self) -> &Rc<RefCell<ScrollPane>> {
        &self.pane
    }
}

impl ScrollTarget for ScrollPaneTarget {
    fn id(&self) -> TargetId {
        self.id
    }

    fn window(&self) -> Option<WindowId> {
        self.window
    }

    fn to_local(&self, screen: Point) -> Point {
        screen - self.origin
    }

    fn apply_delta(&mut self, dx: i32, dy: i32) {
        let mut pane = self.pane.borrow_mut();
        scroll_bar(&mut pane.horizontal, dx);
        scroll_bar(&mut pane.vertical, dy);
    }

    fn set_cursor(&mut self, cursor: Option<CursorShape>) {
        self.pane.borrow_mut().cursor = cursor;
    }
}

/// Two-axis scroll offsets in pixels, bounded by the content extent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollOffsets {
    pub x: i32,
    pub y: i32,
    pub max_x: i32,
    pub max_y: i32,
    pub cursor: Option<CursorShape>,
}

impl ScrollOffsets {
    pub fn new(max_x: i32, max_y: i32) -> Self {
        Self {
            max_x,
            max_y,
            ..Default::default()
        }
    }

    /// Jump to an absolute position with no animation, clamped into the extent.
    pub fn scroll_to(&mut self, x: i32, y: i32) {
        self.x = x.clamp(0, self.max_x.max(0));
        self.y = y.clamp(0, self.max_y.max(0));
    }
}

/// [`ScrollTarget`] handle over shared [`ScrollOffsets`].
#[derive(Debug, Clone)]
pub struct OffsetTarget {
    id: TargetId,
    window: Option<WindowId>,
    offsets: Rc<RefCell<ScrollOffsets>>,
}

impl OffsetTarget {
    pub fn new(id: TargetId, offsets: Rc<RefCell<ScrollOffsets>>) -> Self {
        Self {
            id,
            window: None,
            offsets,
        }
    }

    pub fn with_window(mut self, window: WindowId) -> Self {
        self.window = Some(window);
        self
    }
}

impl ScrollTarget for OffsetTarget {
    fn id(&self) -> TargetId {
        self.id
    }

    fn window(&self) -> Option<WindowId> {
        self.window
    }

    fn apply_delta(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        let mut offsets = self.offsets.borrow_mut();
        let (x, y) = (offsets.x.saturating_add(dx), offsets.y.saturating_add(dy));
        offsets.scroll_to(x, y);
    }

    fn set_cursor(&mut self, cursor: Option<CursorShape>) {
        self.offsets.borrow_mut().cursor = cursor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane(horizontal: Option<ScrollBar>, vertical: Option<ScrollBar>) -> ScrollPaneTarget {
        ScrollPaneTarget::new(
            TargetId(1),
            Rc::new(RefCell::new(ScrollPane::new(horizontal, vertical))),
        )
    }

    #[test]
    fn pane_scrolls_both_bars() {
        let mut target = pane(Some(ScrollBar::new(500)), Some(ScrollBar::new(500)));
        target.apply_delta(7, -3);
        target.apply_delta(0, 40);
        assert_eq!(target.pane().borrow().offsets(), Point::new(7, 37));
    }

    #[test]
    fn pane_drops_hidden_or_missing_axes() {
        let mut target = pane(Some(ScrollBar::new(500).hidden()), Some(ScrollBar::new(500)));
        target.apply_delta(50, 50);
        assert_eq!(target.pane().borrow().offsets(), Point::new(0, 50));

        // Delta on a hidden axis is not queued for later.
        target.pane().borrow_mut().horizontal = Some(ScrollBar::new(500));
        target.apply_delta(0, 0);
        assert_eq!(target.pane().borrow().offsets(), Point::new(0, 50));

        let mut vertical_only = pane(None, Some(ScrollBar::new(10)));
        vertical_only.apply_delta(5, 5);
        assert_eq!(vertical_only.pane().borrow().offsets(), Point::new(0, 5));
    }

    #[test]
    fn pane_clamps_to_range() {
        let mut target = pane(None, Some(ScrollBar::new(100)));
        target.apply_delta(0, 1_000);
        assert_eq!(target.pane().borrow().offsets().y, 100);
        target.apply_delta(0, -1_000);
        assert_eq!(target.pane().borrow().offsets().y, 0);
        target.apply_delta(0, i32::MIN);
        assert_eq!(target.pane().borrow().offsets().y, 0);
    }

    #[test]
    fn pane_converts_to_local_coordinates() {
        let target = pane(None, None).with_origin(Point::new(40, 60));
        assert_eq!(target.to_local(Point::new(100, 100)), Point::new(60, 40));
    }

    #[test]
    fn offsets_scroll_to_is_absolute_and_clamped() {
        let offsets = Rc::new(RefCell::new(ScrollOffsets::new(300, 2_000)));
        let mut target = OffsetTarget::new(TargetId(9), offsets.clone());

        target.apply_delta(-10, 120);
        target.apply_delta(400, 5);
        let offsets = offsets.borrow();
        assert_eq!((offsets.x, offsets.y), (300, 125));
    }

    #[test]
    fn cursor_is_recorded_and_cleared() {
        let offsets = Rc::new(RefCell::new(ScrollOffsets::new(0, 0)));
        let mut target = OffsetTarget::new(TargetId(2), offsets.clone());
        target.set_cursor(Some(CursorShape::ResizeS));
        assert_eq!(offsets.borrow().cursor, Some(CursorShape::ResizeS));
        target.set_cursor(None);
        assert_eq!(offsets.borrow().cursor, None);
    }

    #[test]
    fn closures_resolve_targets() {
        let resolver = |point: Point| -> Option<Box<dyn ScrollTarget>> {
            (point.x < 100).then(|| Box::new(pane(None, None)) as Box<dyn ScrollTarget>)
        };
        assert!(resolver.resolve(Point::new(10, 10)).is_some());
        assert!(resolver.resolve(Point::new(150, 10)).is_none());
    }
}
