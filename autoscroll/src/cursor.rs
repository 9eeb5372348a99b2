use std::fmt;

/// Feedback cursor shown on the scroll target while a gesture is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorShape {
    /// Gesture active but no axis currently scrolling.
    Move,
    ResizeN,
    ResizeS,
    ResizeE,
    ResizeW,
    ResizeNE,
    ResizeNW,
    ResizeSE,
    ResizeSW,
}

impl CursorShape {
    /// Pick the 8-way resize cursor matching the sign of each axis velocity.
    ///
    /// Screen y grows downwards, so a positive vertical velocity points south.
    pub fn for_velocity(x: f64, y: f64) -> CursorShape {
        match (sign(x), sign(y)) {
            (0, 1) => CursorShape::ResizeS,
            (0, -1) => CursorShape::ResizeN,
            (1, 0) => CursorShape::ResizeE,
            (-1, 0) => CursorShape::ResizeW,
            (1, 1) => CursorShape::ResizeSE,
            (1, -1) => CursorShape::ResizeNE,
            (-1, 1) => CursorShape::ResizeSW,
            (-1, -1) => CursorShape::ResizeNW,
            _ => CursorShape::Move,
        }
    }
}

/// CSS cursor names.
impl fmt::Display for CursorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CursorShape::Move => "move",
            CursorShape::ResizeN => "n-resize",
            CursorShape::ResizeS => "s-resize",
            CursorShape::ResizeE => "e-resize",
            CursorShape::ResizeW => "w-resize",
            CursorShape::ResizeNE => "ne-resize",
            CursorShape::ResizeNW => "nw-resize",
            CursorShape::ResizeSE => "se-resize",
            CursorShape::ResizeSW => "sw-resize",
        };
        f.write_str(name)
    }
}

fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}
