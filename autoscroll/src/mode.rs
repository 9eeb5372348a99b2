use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Which axes fast mouse scrolling is allowed to drive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollMode {
    /// The interceptor never touches input.
    Disabled,
    #[default]
    Vertical,
    Both,
}

impl ScrollMode {
    pub fn horizontal(self) -> bool {
        matches!(self, ScrollMode::Both)
    }

    pub fn vertical(self) -> bool {
        matches!(self, ScrollMode::Vertical | ScrollMode::Both)
    }

    pub fn is_enabled(self) -> bool {
        self != ScrollMode::Disabled
    }
}

impl fmt::Display for ScrollMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScrollMode::Disabled => "Disabled",
            ScrollMode::Vertical => "Vertical",
            ScrollMode::Both => "Both",
        };
        f.write_str(name)
    }
}

impl FromStr for ScrollMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disabled" | "none" | "off" => Ok(ScrollMode::Disabled),
            "vertical" => Ok(ScrollMode::Vertical),
            "both" => Ok(ScrollMode::Both),
            _ => Err(ParseError::UnknownScrollMode(s.to_string())),
        }
    }
}

/// Which gesture a press starts: velocity autoscroll, or 1:1 panning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureKind {
    #[default]
    Autoscroll,
    Pan,
}

impl FromStr for GestureKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "autoscroll" | "scroll" => Ok(GestureKind::Autoscroll),
            "pan" => Ok(GestureKind::Pan),
            _ => Err(ParseError::UnknownGestureKind(s.to_string())),
        }
    }
}
