//! Folds winit window events into per-frame pointer snapshots.

use rgizmo_core::{PointerState, Vec2};
use winit::event::{ElementState, MouseButton, WindowEvent};

/// Tracks the cursor and the drag button across frames.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    drag_button: MouseButton,
    position: Vec2,
    previous: Vec2,
    drag_button_down: bool,
    inside: bool,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerTracker {
    /// Creates a tracker that drags with the left mouse button.
    pub fn new() -> Self {
        Self::with_drag_button(MouseButton::Left)
    }

    pub fn with_drag_button(drag_button: MouseButton) -> Self {
        Self {
            drag_button,
            position: Vec2::ZERO,
            previous: Vec2::ZERO,
            drag_button_down: false,
            inside: false,
        }
    }

    /// Feeds one window event. Returns true if it changed the pointer state.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let position = Vec2::new(position.x as f32, position.y as f32);
                self.cursor_moved(position);
                true
            }
            WindowEvent::MouseInput { state, button, .. } => self.mouse_input(*button, *state),
            WindowEvent::CursorLeft { .. } => {
                self.cursor_left();
                true
            }
            _ => false,
        }
    }

    /// Moves the cursor to `position` in window pixels.
    pub fn cursor_moved(&mut self, position: Vec2) {
        if !self.inside {
            // re-entering the window must not produce a jump
            self.previous = position;
            self.inside = true;
        }
        self.position = position;
    }

    /// Records a button press or release. Returns true for the drag button.
    pub fn mouse_input(&mut self, button: MouseButton, state: ElementState) -> bool {
        if button != self.drag_button {
            return false;
        }
        self.drag_button_down = state == ElementState::Pressed;
        true
    }

    pub fn cursor_left(&mut self) {
        self.inside = false;
    }

    /// Snapshot for the current frame.
    pub fn state(&self) -> PointerState {
        PointerState::new(
            self.position,
            self.position - self.previous,
            self.drag_button_down,
        )
    }

    /// Ends the frame: the next snapshot's delta starts from here.
    pub fn end_frame(&mut self) {
        self.previous = self.position;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_accumulates_until_end_frame() {
        let mut tracker = PointerTracker::new();
        tracker.cursor_moved(Vec2::new(100.0, 100.0));
        assert_eq!(tracker.state().delta, Vec2::ZERO);

        tracker.cursor_moved(Vec2::new(104.0, 101.0));
        tracker.cursor_moved(Vec2::new(110.0, 103.0));
        assert_eq!(tracker.state().delta, Vec2::new(10.0, 3.0));

        tracker.end_frame();
        assert_eq!(tracker.state().delta, Vec2::ZERO);
        assert_eq!(tracker.state().position, Vec2::new(110.0, 103.0));
    }

    #[test]
    fn test_only_drag_button_counts() {
        let mut tracker = PointerTracker::new();
        assert!(!tracker.mouse_input(MouseButton::Middle, ElementState::Pressed));
        assert!(!tracker.state().drag_button_down);

        assert!(tracker.mouse_input(MouseButton::Left, ElementState::Pressed));
        assert!(tracker.state().drag_button_down);
        tracker.mouse_input(MouseButton::Left, ElementState::Released);
        assert!(!tracker.state().drag_button_down);
    }

    #[test]
    fn test_custom_drag_button() {
        let mut tracker = PointerTracker::with_drag_button(MouseButton::Right);
        assert!(!tracker.mouse_input(MouseButton::Left, ElementState::Pressed));
        assert!(tracker.mouse_input(MouseButton::Right, ElementState::Pressed));
        assert!(tracker.state().drag_button_down);
    }

    #[test]
    fn test_reentering_window_has_no_jump() {
        let mut tracker = PointerTracker::new();
        tracker.cursor_moved(Vec2::new(10.0, 10.0));
        tracker.end_frame();
        tracker.cursor_left();
        tracker.cursor_moved(Vec2::new(700.0, 300.0));
        assert_eq!(tracker.state().delta, Vec2::ZERO);
    }
}
