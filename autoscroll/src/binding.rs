use crate::{
    error::ParseError,
    input::{InputEvent, Modifiers, MouseButton},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The mouse shortcut that starts and stops a gesture.
///
/// Written as modifiers followed by a button, joined with `+`: `middle`, `shift+middle`,
/// `ctrl+alt+back`. The modifier set must match the event exactly, so a plain `middle`
/// binding leaves `ctrl+middle` to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActivationBinding {
    pub button: MouseButton,
    pub modifiers: Modifiers,
}

impl ActivationBinding {
    pub fn new(button: MouseButton, modifiers: Modifiers) -> Self {
        Self { button, modifiers }
    }

    pub fn matches(&self, event: &InputEvent) -> bool {
        event.button() == Some(self.button) && event.modifiers == self.modifiers
    }
}

impl Default for ActivationBinding {
    fn default() -> Self {
        Self::new(MouseButton::Middle, Modifiers::NONE)
    }
}

impl fmt::Display for ActivationBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.modifiers, self.button)
    }
}

impl FromStr for ActivationBinding {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let button = match parts.pop() {
            Some(button) if !button.is_empty() => button.parse::<MouseButton>()?,
            _ => return Err(ParseError::EmptyBinding),
        };

        let mut modifiers = Modifiers::NONE;
        for part in parts {
            if !modifiers.set_named(part) {
                return Err(ParseError::UnknownModifier {
                    binding: s.to_string(),
                    modifier: part.to_string(),
                });
            }
        }

        Ok(Self { button, modifiers })
    }
}

impl TryFrom<String> for ActivationBinding {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ActivationBinding> for String {
    fn from(binding: ActivationBinding) -> Self {
        binding.to_string()
    }
}
