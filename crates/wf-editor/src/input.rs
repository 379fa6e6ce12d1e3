//! Input abstraction layer.
//!
//! Normalizes host pointer/wheel events into a unified `InputEvent` enum
//! consumed by the editor session. Hosts (native event loops, web bridges)
//! translate their raw events into these and feed them in receipt order;
//! the session assumes down → move → up/leave ordering and performs no
//! sequence validation.

/// Which pointer button an event carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// A normalized input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed. Coordinates are screen-space pixels.
    PointerDown {
        x: f32,
        y: f32,
        button: PointerButton,
    },

    /// Pointer moved.
    PointerMove { x: f32, y: f32 },

    /// Pointer released.
    PointerUp { x: f32, y: f32 },

    /// Pointer left the canvas. Terminates any active gesture.
    PointerLeave,

    /// Wheel scroll over the canvas at (x, y). Negative `delta_y` zooms in.
    Wheel { x: f32, y: f32, delta_y: f32 },
}

impl InputEvent {
    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::PointerDown {
            x,
            y,
            button: PointerButton::Primary,
        }
    }

    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn wheel(x: f32, y: f32, delta_y: f32) -> Self {
        Self::Wheel { x, y, delta_y }
    }

    /// Extract the position if this is a positioned event.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y }
            | Self::Wheel { x, y, .. } => Some((*x, *y)),
            Self::PointerLeave => None,
        }
    }
}
