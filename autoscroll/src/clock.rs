//! Time and one-shot timer seams between the gesture engine and the host event loop.
//!
//! Everything runs on the host's UI thread. A gesture never owns a running timer; it asks
//! the [`Scheduler`] for a single callback, and re-arms from inside that callback. Dropping
//! the re-arm is how a disposed gesture stops ticking.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
    time::{Duration, Instant},
};

/// Monotonic time source. Values are offsets from an arbitrary per-clock epoch.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// [`Clock`] backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Hand-driven [`Clock`]. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Handle for a scheduled one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// One-shot timer service provided by the host.
///
/// When a timer fires the host must call
/// [`AutoscrollController::fire_timer`](crate::AutoscrollController::fire_timer) with its id.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancelling an unknown or already fired timer is a no-op.
    fn cancel(&mut self, id: TimerId);
}

#[derive(Debug)]
struct Pending {
    id: TimerId,
    deadline: Duration,
}

struct QueueState {
    clock: Rc<dyn Clock>,
    next_id: u64,
    pending: Vec<Pending>,
}

impl fmt::Debug for QueueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueState")
            .field("now", &self.clock.now())
            .field("next_id", &self.next_id)
            .field("pending", &self.pending)
            .finish()
    }
}

/// Deadline queue a host loop polls to drive one-shot timers.
///
/// Clones share the queue, so one clone can be handed to the controller as its
/// [`Scheduler`] while the host keeps another to poll with [`TimerQueue::pop_due`].
#[derive(Debug, Clone)]
pub struct TimerQueue {
    state: Rc<RefCell<QueueState>>,
}

impl TimerQueue {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            state: Rc::new(RefCell::new(QueueState {
                clock,
                next_id: 1,
                pending: Vec::new(),
            })),
        }
    }

    pub fn len(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.state
            .borrow()
            .pending
            .iter()
            .map(|pending| pending.deadline)
            .min()
    }

    /// Remove and return the earliest timer whose deadline is at or before `now`.
    ///
    /// Ties fire in scheduling order.
    pub fn pop_due(&self, now: Duration) -> Option<TimerId> {
        let mut state = self.state.borrow_mut();
        let index = state
            .pending
            .iter()
            .enumerate()
            .filter(|(_, pending)| pending.deadline <= now)
            .min_by_key(|(_, pending)| (pending.deadline, pending.id))
            .map(|(index, _)| index)?;
        Some(state.pending.remove(index).id)
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = TimerId(state.next_id);
        state.next_id += 1;
        let deadline = state.clock.now() + delay;
        state.pending.push(Pending { id, deadline });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.state
            .borrow_mut()
            .pending
            .retain(|pending| pending.id != id);
    }
}
