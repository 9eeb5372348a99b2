//! Mapping from cursor displacement to scroll velocity.
//!
//! Both curves are odd functions of the displacement with a dead zone around the start
//! point in which the velocity is exactly zero, so an axis whose cursor sits inside the
//! dead zone is reported as inactive.
//!
//! Other notable implementations of the same idea: Chromium's
//! `AutoscrollController::HandleMouseMoveForMiddleClickAutoscroll` and WebKit's
//! `RenderBox::calculateAutoscrollDirection`.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub trait ScrollSpeed {
    fn name(&self) -> &'static str;

    /// Scroll velocity in pixels per second for a displacement of `delta` pixels from the
    /// gesture start point.
    fn speed(&self, delta: i32) -> f64;
}

/// Superlinear curve modelled on Gecko's `AutoScrollController`.
///
/// Every 12 pixels of displacement is one unit; velocity grows with units^1.5 and
/// anything within one unit of the start point does not scroll.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeckoSpeed;

impl GeckoSpeed {
    const PIXELS_PER_UNIT: f64 = 12.0;
    /// Gecko steps at 20 Hz; this converts its per-step distance to a per-second one.
    const TIME_COMPENSATION: f64 = 1000.0 / 20.0;
}

impl ScrollSpeed for GeckoSpeed {
    fn name(&self) -> &'static str {
        "Like Gecko"
    }

    fn speed(&self, delta: i32) -> f64 {
        let value = f64::from(delta) / Self::PIXELS_PER_UNIT;

        if value > 1.0 {
            return (value * value.sqrt() - 1.0) * Self::TIME_COMPENSATION;
        }
        if value < -1.0 {
            return (value * (-value).sqrt() + 1.0) * Self::TIME_COMPENSATION;
        }
        0.0
    }
}

/// Quadratic curve past a 10 pixel dead zone, both measured in display-scaled pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticSpeed {
    display_scale: f32,
}

impl QuadraticSpeed {
    const DEAD_ZONE: f32 = 10.0;
    const DIVISOR: f64 = 40.0;

    pub fn new(display_scale: f32) -> Self {
        let display_scale = if display_scale.is_finite() && display_scale > 0.0 {
            display_scale
        } else {
            1.0
        };
        Self { display_scale }
    }

    fn dead_zone(&self) -> i32 {
        (Self::DEAD_ZONE * self.display_scale).round() as i32
    }
}

impl Default for QuadraticSpeed {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ScrollSpeed for QuadraticSpeed {
    fn name(&self) -> &'static str {
        "Default"
    }

    fn speed(&self, delta: i32) -> f64 {
        let value = delta.saturating_abs() - self.dead_zone();
        if value < 1 {
            return 0.0;
        }

        let value = f64::from(value);
        let speed = value * value / Self::DIVISOR / f64::from(self.display_scale);
        if speed < 1.0 {
            return 0.0;
        }

        speed * f64::from(delta.signum())
    }
}

/// Speed curve selection as stored in settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedAlgorithm {
    #[default]
    Gecko,
    Quadratic,
}

impl SpeedAlgorithm {
    pub fn curve(self, display_scale: f32) -> Box<dyn ScrollSpeed> {
        match self {
            SpeedAlgorithm::Gecko => Box::new(GeckoSpeed),
            SpeedAlgorithm::Quadratic => Box::new(QuadraticSpeed::new(display_scale)),
        }
    }
}

impl fmt::Display for SpeedAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SpeedAlgorithm::Gecko => "gecko",
            SpeedAlgorithm::Quadratic => "quadratic",
        })
    }
}

impl FromStr for SpeedAlgorithm {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gecko" => Ok(SpeedAlgorithm::Gecko),
            "quadratic" | "simple" | "default" => Ok(SpeedAlgorithm::Quadratic),
            _ => Err(ParseError::UnknownSpeedAlgorithm(s.to_string())),
        }
    }
}
