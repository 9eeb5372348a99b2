use std::time::Duration;

/// Per-axis converter from a velocity to whole-pixel scroll steps.
///
/// The sub-pixel part of every step is carried into the next one, so a constant velocity
/// integrates to the exact distance over any number of ticks instead of drifting by the
/// rounding error of each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisDelta {
    /// Pixels per second, signed. Zero means the axis is idle.
    velocity: f64,
    /// Always within `[-0.5, 0.5]` after a step.
    remainder: f64,
}

impl AxisDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn remainder(&self) -> f64 {
        self.remainder
    }

    pub fn is_active(&self) -> bool {
        self.velocity != 0.0
    }

    /// Update the velocity, returning `true` if the axis switched between idle and active.
    ///
    /// A switch discards the carried remainder so a reactivated axis starts clean.
    pub fn set_velocity(&mut self, velocity: f64) -> bool {
        let was_active = self.is_active();
        self.velocity = velocity;
        let toggled = was_active != self.is_active();
        if toggled {
            self.remainder = 0.0;
        }
        toggled
    }

    /// Advance by `elapsed`, returning the whole pixels to scroll on this axis.
    ///
    /// Rounds half away from zero.
    pub fn step(&mut self, elapsed: Duration) -> i32 {
        let exact = self.remainder + self.velocity * elapsed.as_secs_f64();
        let delta = exact.round();
        self.remainder = exact - delta;
        delta as i32
    }
}
