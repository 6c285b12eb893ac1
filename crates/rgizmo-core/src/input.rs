//! Per-frame pointer snapshot.

use glam::Vec2;

/// Cursor movement below this (sum of absolute deltas, in pixels) counts as stationary.
pub const MOTION_EPSILON: f32 = 1e-6;

/// Pointer state for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    /// Cursor position in window pixels (origin top-left).
    pub position: Vec2,
    /// Cursor movement since the previous frame.
    pub delta: Vec2,
    /// Whether the drag button is held.
    pub drag_button_down: bool,
}

impl PointerState {
    #[must_use]
    pub fn new(position: Vec2, delta: Vec2, drag_button_down: bool) -> Self {
        Self {
            position,
            delta,
            drag_button_down,
        }
    }

    /// Whether the cursor moved this frame.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.delta.x.abs() + self.delta.y.abs() > MOTION_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stationary_cursor() {
        let pointer = PointerState::new(Vec2::new(10.0, 10.0), Vec2::ZERO, true);
        assert!(!pointer.is_moving());
    }

    #[test]
    fn test_moving_cursor() {
        let pointer = PointerState::new(Vec2::new(10.0, 10.0), Vec2::new(-1.0, 0.0), false);
        assert!(pointer.is_moving());

        let nudge = PointerState::new(Vec2::ZERO, Vec2::new(1e-7, 0.0), false);
        assert!(!nudge.is_moving());
    }
}
