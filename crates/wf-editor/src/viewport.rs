//! Viewport controller: continuous pan/zoom state.
//!
//! Owns the live `ViewTransform` and is its only writer. Wheel events zoom
//! about the cursor so the world point under it stays fixed; primary-button
//! drags on empty canvas pan. Panning is suppressed for the whole
//! pointer-down..up sequence whenever an object-level gesture owns the
//! pointer, so the canvas can never slide out from under a dragged node.

use crate::input::PointerButton;
use wf_core::geometry::Point;
use wf_core::transform::{ViewTransform, zoom_about};

/// Zoom speed per wheel delta unit.
pub const ZOOM_SENSITIVITY: f32 = 0.0015;

/// Default scale bounds. Out-of-range targets are clamped, never rejected.
pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 5.0;

#[derive(Debug, Clone)]
pub struct ViewportController {
    transform: ViewTransform,
    is_panning: bool,
    last_pointer: Point,
    min_scale: f32,
    max_scale: f32,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportController {
    pub fn new() -> Self {
        Self::with_bounds(MIN_SCALE, MAX_SCALE)
    }

    /// Controller with custom scale bounds (configuration inputs).
    pub fn with_bounds(min_scale: f32, max_scale: f32) -> Self {
        Self {
            transform: ViewTransform::default(),
            is_panning: false,
            last_pointer: Point::ZERO,
            min_scale,
            max_scale,
        }
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn scale(&self) -> f32 {
        self.transform.scale
    }

    pub fn offset(&self) -> Point {
        self.transform.offset
    }

    pub fn is_panning(&self) -> bool {
        self.is_panning
    }

    /// Zoom about the cursor. The target scale is clamped to the bounds
    /// before the offset is recomputed, so repeated zoom at a bound is a
    /// fixed point.
    pub fn on_wheel(&mut self, pos: Point, delta_y: f32) {
        let scale_delta = 1.0 - delta_y * ZOOM_SENSITIVITY;
        let new_scale = (self.transform.scale * scale_delta).clamp(self.min_scale, self.max_scale);
        self.transform = zoom_about(&self.transform, pos, new_scale);
        self.is_panning = false;
    }

    /// Begin panning, unless a non-primary button is down or an object
    /// gesture owns the pointer (then this controller takes no action).
    pub fn on_pointer_down(
        &mut self,
        pos: Point,
        button: PointerButton,
        object_gesture_active: bool,
    ) {
        if button != PointerButton::Primary || object_gesture_active {
            return;
        }
        self.last_pointer = pos;
        self.is_panning = true;
    }

    /// While panning, accumulate the pointer delta into the offset.
    pub fn on_pointer_move(&mut self, pos: Point) {
        if !self.is_panning {
            return;
        }
        self.transform.offset = self.transform.offset + (pos - self.last_pointer);
        self.last_pointer = pos;
    }

    /// End panning unconditionally.
    pub fn on_pointer_up(&mut self) {
        if self.is_panning {
            log::debug!(
                "pan ended at offset ({}, {})",
                self.transform.offset.x,
                self.transform.offset.y
            );
        }
        self.is_panning = false;
    }

    /// Pointer left the canvas: same as release.
    pub fn on_pointer_leave(&mut self) {
        self.is_panning = false;
    }
}
