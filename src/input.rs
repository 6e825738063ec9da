//! Input model: wheel deltas and the drag gesture state.
//!
//! The sky canvas only supports two gestures: wheel zoom and drag-to-pan.
//! `InputState` tracks the drag between pointer-down and pointer-up so each
//! move can pan by the delta since the previous event.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::consts::{WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

impl WheelDelta {
    /// Zoom factor for this scroll: out when scrolling down, in otherwise.
    #[must_use]
    pub fn zoom_factor(self) -> f64 {
        if self.dy > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN }
    }
}

/// Gesture being tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the canvas by dragging.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }
}
