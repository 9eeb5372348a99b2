use thiserror::Error;

/// Errors from parsing the text forms used in settings files and traces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown mouse button: {0}")]
    UnknownButton(String),

    #[error("unknown modifier `{modifier}` in binding `{binding}`")]
    UnknownModifier { binding: String, modifier: String },

    #[error("empty activation binding")]
    EmptyBinding,

    #[error("unknown scroll mode: {0} (expected disabled, vertical or both)")]
    UnknownScrollMode(String),

    #[error("unknown speed algorithm: {0} (expected gecko or quadratic)")]
    UnknownSpeedAlgorithm(String),

    #[error("unknown gesture kind: {0} (expected autoscroll or pan)")]
    UnknownGestureKind(String),
}
