//! User settings for fast mouse scrolling.
//!
//! Loads `settings.toml` with an optional CLI override, falling back to the embedded
//! defaults in `autoscroll/settings.toml`.
//!
//! # Live settings
//!
//! The controller reads settings through [`SettingsSource`] on every dispatch, so edits made
//! through [`SharedSettings`] between gestures are picked up by the next one. Inside a
//! gesture, the scroll mode, tick interval and speed curve are frozen at its start; the
//! toggle flag and activation binding keep being read live.

use crate::{
    binding::ActivationBinding,
    mode::{GestureKind, ScrollMode},
    speed::SpeedAlgorithm,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, path::Path, rc::Rc, time::Duration};

pub const MIN_DELAY_MS: u64 = 1;
pub const MAX_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub scroll_mode: ScrollMode,

    /// Press-and-release without dragging keeps the gesture running until the next click.
    pub click_to_drag_toggle: bool,

    /// Interval between scroll ticks, in milliseconds. Clamped to 1..=500.
    pub delay_ms: u64,

    pub speed: SpeedAlgorithm,

    pub gesture: GestureKind,

    pub activation: ActivationBinding,

    /// Display scale factor, used by curves that measure in scaled pixels.
    pub display_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scroll_mode: ScrollMode::Vertical,
            click_to_drag_toggle: true,
            delay_ms: 10,
            speed: SpeedAlgorithm::Gecko,
            gesture: GestureKind::Autoscroll,
            activation: ActivationBinding::default(),
            display_scale: 1.0,
        }
    }
}

impl Settings {
    /// Read and deserialize a TOML settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

        Ok(settings.normalized())
    }

    /// Load settings with priority: CLI override > discovered path > embedded defaults.
    pub fn load_with_overrides(
        cli_override: Option<&Path>,
        discovered_path: Option<&Path>,
    ) -> Result<Self> {
        if let Some(path) = cli_override {
            return Self::load(path);
        }
        if let Some(path) = discovered_path {
            return Self::load(path);
        }
        Self::load_embedded()
    }

    fn load_embedded() -> Result<Self> {
        let source = include_str!("../settings.toml");
        let settings: Settings =
            toml::from_str(source).context("Failed to parse embedded settings.toml")?;
        Ok(settings.normalized())
    }

    /// Clamp out-of-range values instead of rejecting the file.
    pub fn normalized(mut self) -> Self {
        let delay = self.delay_ms.clamp(MIN_DELAY_MS, MAX_DELAY_MS);
        if delay != self.delay_ms {
            tracing::warn!(
                delay_ms = self.delay_ms,
                clamped = delay,
                "Scroll delay out of range"
            );
            self.delay_ms = delay;
        }
        if !(self.display_scale.is_finite() && self.display_scale > 0.0) {
            tracing::warn!(display_scale = self.display_scale, "Invalid display scale, using 1.0");
            self.display_scale = 1.0;
        }
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.delay_ms.clamp(MIN_DELAY_MS, MAX_DELAY_MS))
    }
}

/// Live view of the user's settings.
pub trait SettingsSource {
    fn settings(&self) -> Settings;
}

impl SettingsSource for Settings {
    fn settings(&self) -> Settings {
        *self
    }
}

/// Settings shared between the host's preferences and the controller. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Rc<RefCell<Settings>>,
}

impl SharedSettings {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Rc::new(RefCell::new(settings)),
        }
    }

    pub fn update(&self, f: impl FnOnce(&mut Settings)) {
        let mut settings = self.inner.borrow_mut();
        f(&mut settings);
        *settings = settings.normalized();
    }
}

impl SettingsSource for SharedSettings {
    fn settings(&self) -> Settings {
        *self.inner.borrow()
    }
}
