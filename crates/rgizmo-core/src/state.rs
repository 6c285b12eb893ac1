//! Hover/drag state machine.

use crate::pick::{Axis, HandleHit, HandleKind};

/// Interaction state of a gizmo.
///
/// `Hot` means hovered, `Active` means being dragged. Both carry the handle kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GizmoState {
    /// Nothing hovered or dragged.
    #[default]
    Cold,
    /// A handle is under the cursor and the drag button is up.
    Hot(HandleKind),
    /// A handle is being dragged.
    Active(HandleKind),
}

impl GizmoState {
    /// Kind of the hot or active handle.
    #[must_use]
    pub fn kind(self) -> Option<HandleKind> {
        match self {
            GizmoState::Cold => None,
            GizmoState::Hot(kind) | GizmoState::Active(kind) => Some(kind),
        }
    }

    #[must_use]
    pub fn is_hot(self) -> bool {
        matches!(self, GizmoState::Hot(_))
    }

    #[must_use]
    pub fn is_dragging(self) -> bool {
        matches!(self, GizmoState::Active(_))
    }

    /// Kind of the handle being dragged, if any.
    #[must_use]
    pub fn dragging(self) -> Option<HandleKind> {
        match self {
            GizmoState::Active(kind) => Some(kind),
            _ => None,
        }
    }
}

/// State plus the axis of the handle it refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interaction {
    pub state: GizmoState,
    pub axis: Axis,
}

impl Interaction {
    /// Advances one frame given the picked handle and the drag button.
    ///
    /// Releasing the button always ends a drag. A drag in progress ignores picking until the
    /// button is released. Otherwise a hit makes its handle hot (button up) or active
    /// (button down), and a miss leaves the state alone (see [`Interaction::state_after_miss`]).
    pub fn step(&mut self, hit: Option<HandleHit>, drag_button_down: bool) {
        let previous = *self;

        if !drag_button_down {
            self.state = GizmoState::Cold;
        }

        if !self.state.is_dragging() {
            match hit {
                Some(hit) => {
                    self.axis = hit.axis;
                    self.state = if drag_button_down {
                        GizmoState::Active(hit.kind)
                    } else {
                        GizmoState::Hot(hit.kind)
                    };
                }
                None => self.state = Self::state_after_miss(self.state),
            }
        }

        if *self != previous {
            log::debug!(
                "gizmo {:?}/{:?} -> {:?}/{:?}",
                previous.state,
                previous.axis,
                self.state,
                self.axis
            );
        }
    }

    /// Cursor over the background: the state keeps its previous value.
    ///
    /// With the button up the state was already reset to cold, so this only matters while
    /// the button is held: a hot handle stays hot when the press starts off the handle.
    fn state_after_miss(state: GizmoState) -> GizmoState {
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(axis: Axis, kind: HandleKind) -> Option<HandleHit> {
        Some(HandleHit::new(axis, kind))
    }

    #[test]
    fn test_press_on_axis_handle_activates() {
        let mut interaction = Interaction::default();
        interaction.step(hit(Axis::X, HandleKind::Axis), true);
        assert_eq!(interaction.state, GizmoState::Active(HandleKind::Axis));
        assert_eq!(interaction.axis, Axis::X);
        assert!(interaction.state.is_dragging());
    }

    #[test]
    fn test_hover_then_leave() {
        let mut interaction = Interaction::default();
        interaction.step(hit(Axis::Z, HandleKind::Rotation), false);
        assert_eq!(interaction.state, GizmoState::Hot(HandleKind::Rotation));
        assert_eq!(interaction.axis, Axis::Z);

        interaction.step(None, false);
        assert_eq!(interaction.state, GizmoState::Cold);
        assert_eq!(interaction.axis, Axis::Z);
    }

    #[test]
    fn test_drag_survives_leaving_handle() {
        let mut interaction = Interaction::default();
        interaction.step(hit(Axis::Y, HandleKind::Plane), true);
        interaction.step(None, true);
        interaction.step(hit(Axis::X, HandleKind::Rotation), true);
        assert_eq!(interaction.state, GizmoState::Active(HandleKind::Plane));
        assert_eq!(interaction.axis, Axis::Y);

        interaction.step(hit(Axis::X, HandleKind::Rotation), false);
        assert_eq!(interaction.state, GizmoState::Hot(HandleKind::Rotation));
        assert_eq!(interaction.axis, Axis::X);
    }

    #[test]
    fn test_release_ends_drag_on_background() {
        let mut interaction = Interaction::default();
        interaction.step(hit(Axis::Z, HandleKind::Axis), true);
        interaction.step(None, false);
        assert_eq!(interaction.state, GizmoState::Cold);
    }

    #[test]
    fn test_miss_with_button_held_keeps_hot() {
        let mut interaction = Interaction::default();
        interaction.step(hit(Axis::X, HandleKind::Plane), false);
        interaction.step(None, true);
        assert_eq!(interaction.state, GizmoState::Hot(HandleKind::Plane));
    }

    #[test]
    fn test_held_button_entering_handle_activates() {
        let mut interaction = Interaction::default();
        interaction.step(None, true);
        interaction.step(hit(Axis::X, HandleKind::Axis), true);
        assert_eq!(interaction.state, GizmoState::Active(HandleKind::Axis));
    }
}
