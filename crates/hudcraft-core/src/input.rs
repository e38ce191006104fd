//! Pointer events for mouse and touch input.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Pointer event type for unified mouse/touch handling.
///
/// Positions are in client coordinates, i.e. the same space as the
/// drag surface's bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    Up {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    TouchStart {
        touches: Vec<Point>,
    },
    TouchMove {
        touches: Vec<Point>,
    },
    TouchEnd,
}

impl PointerEvent {
    /// The position that drives interaction: the pointer, or the first touch.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position } => Some(*position),
            PointerEvent::TouchStart { touches } | PointerEvent::TouchMove { touches } => {
                touches.first().copied()
            }
            PointerEvent::TouchEnd => None,
        }
    }

    /// Check if this event ends a press (any button, or touch end).
    pub fn is_release(&self) -> bool {
        matches!(self, PointerEvent::Up { .. } | PointerEvent::TouchEnd)
    }
}
