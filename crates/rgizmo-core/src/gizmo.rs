//! Per-instance gizmo value.
//!
//! A [`Gizmo`] owns its view configuration, its interaction state and the result of its last
//! update. It holds no GPU resources: the caller renders the picking pass, reads back the id
//! under the cursor and hands it to [`Gizmo::apply_pick`].

use glam::{Mat4, Vec3};

use crate::camera::{Camera, Viewport};
use crate::config::ViewConfig;
use crate::geometry::{GizmoGeometry, HandleColors};
use crate::input::PointerState;
use crate::pick::{decode_handle_id, Axis, HandleKind};
use crate::solver::{axis_translation, drag_ray, plane_translation, rotation_angle};
use crate::state::{GizmoState, Interaction};
use crate::transform::UpdateResult;

/// An interactive translate/rotate gizmo.
#[derive(Debug, Clone, Default)]
pub struct Gizmo {
    view: ViewConfig,
    interaction: Interaction,
    update: UpdateResult,
}

impl Gizmo {
    /// Creates a gizmo with the default view configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gizmo with the given view configuration.
    #[must_use]
    pub fn with_config(view: ViewConfig) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    pub fn set_view(&mut self, view: ViewConfig) {
        self.view = view;
    }

    #[must_use]
    pub fn state(&self) -> GizmoState {
        self.interaction.state
    }

    /// Axis of the handle last hovered or dragged.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.interaction.axis
    }

    /// Result of the last update.
    #[must_use]
    pub fn result(&self) -> UpdateResult {
        self.update
    }

    /// Visible colors for the current state.
    #[must_use]
    pub fn colors(&self) -> HandleColors {
        HandleColors::for_state(self.interaction.state, self.interaction.axis)
    }

    /// Handle layout for this frame with the given colors.
    #[must_use]
    pub fn geometry(&self, camera: &Camera, pivot: Vec3, colors: &HandleColors) -> GizmoGeometry {
        GizmoGeometry::new(&self.view, camera, pivot, colors)
    }

    /// Advances one frame from the id picked under the cursor.
    ///
    /// Clears the angle and translation, steps the state machine, records the current axis,
    /// then runs the solver for the dragged handle if the cursor moved.
    pub fn apply_pick(
        &mut self,
        picked_id: u8,
        pointer: &PointerState,
        camera: &Camera,
        viewport: Viewport,
        pivot: Vec3,
    ) {
        let hit = decode_handle_id(picked_id);
        if hit.is_some() {
            log::debug!("picked id {picked_id} -> {hit:?}");
        }
        self.interaction.step(hit, pointer.drag_button_down);

        let axis = self.interaction.axis.unit();
        self.update = UpdateResult {
            axis,
            ..UpdateResult::default()
        };

        let Some(kind) = self.interaction.state.dragging() else {
            return;
        };
        if !pointer.is_moving() {
            return;
        }

        match kind {
            HandleKind::Rotation => {
                let pivot_screen = camera.world_to_screen(pivot, viewport);
                self.update.angle = rotation_angle(
                    pivot_screen,
                    pointer.position,
                    pointer.delta,
                    axis,
                    pivot,
                    camera.position,
                );
            }
            HandleKind::Axis => {
                let ray = drag_ray(camera, viewport, pivot, pointer.delta);
                self.update.translation = axis_translation(ray, pivot, axis).unwrap_or(Vec3::ZERO);
            }
            HandleKind::Plane => {
                let ray = drag_ray(camera, viewport, pivot, pointer.delta);
                self.update.translation = plane_translation(ray, pivot, axis).unwrap_or(Vec3::ZERO);
            }
        }

        log::trace!(
            "{kind:?} drag on {:?}: translation {:?}, angle {}",
            self.interaction.axis,
            self.update.translation,
            self.update.angle
        );
    }

    /// Transform to left-multiply onto the manipulated object's transform.
    #[must_use]
    pub fn transform(&self, pivot: Vec3) -> Mat4 {
        self.update.to_matrix(pivot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pick::encode_handle_id;
    use glam::Vec2;

    fn setup() -> (Camera, Viewport) {
        (
            Camera::new(Vec3::splat(5.0), Vec3::ZERO),
            Viewport::new(800.0, 450.0),
        )
    }

    #[test]
    fn test_scenario_geometry() {
        let (camera, _) = setup();
        let gizmo = Gizmo::new();
        let geometry = gizmo.geometry(&camera, Vec3::ZERO, &HandleColors::picking());
        assert!((camera.position.distance(Vec3::ZERO) - 8.660).abs() < 1e-3);
        assert!((geometry.radius - 1.039).abs() < 1e-3);

        let x_tip = geometry
            .axis_handles
            .iter()
            .find(|h| h.axis == Axis::X)
            .map(|h| h.position)
            .unwrap();
        assert!((x_tip - Vec3::new(1.247, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_press_on_x_axis_handle() {
        let (camera, viewport) = setup();
        let mut gizmo = Gizmo::new();
        let pointer = PointerState::new(Vec2::new(500.0, 260.0), Vec2::ZERO, true);
        gizmo.apply_pick(2, &pointer, &camera, viewport, Vec3::ZERO);
        assert_eq!(gizmo.state(), GizmoState::Active(HandleKind::Axis));
        assert_eq!(gizmo.axis().unit(), Vec3::new(1.0, 0.0, 0.0));
        assert!(gizmo.result().is_identity());
    }

    #[test]
    fn test_hover_z_ring_then_leave() {
        let (camera, viewport) = setup();
        let mut gizmo = Gizmo::new();
        let pointer = PointerState::new(Vec2::new(400.0, 200.0), Vec2::ZERO, false);
        gizmo.apply_pick(9, &pointer, &camera, viewport, Vec3::ZERO);
        assert_eq!(gizmo.state(), GizmoState::Hot(HandleKind::Rotation));
        assert_eq!(gizmo.axis().unit(), Vec3::Z);
        assert_eq!(gizmo.colors().rotation.z, crate::color::Color::WHITE);

        gizmo.apply_pick(0, &pointer, &camera, viewport, Vec3::ZERO);
        assert_eq!(gizmo.state(), GizmoState::Cold);
    }

    #[test]
    fn test_axis_drag_moves_along_axis() {
        let (camera, viewport) = setup();
        let mut gizmo = Gizmo::new();
        let press = PointerState::new(Vec2::new(500.0, 260.0), Vec2::ZERO, true);
        gizmo.apply_pick(encode_handle_id(Axis::X, HandleKind::Axis), &press, &camera, viewport, Vec3::ZERO);

        let drag = PointerState::new(Vec2::new(520.0, 270.0), Vec2::new(20.0, 10.0), true);
        gizmo.apply_pick(0, &drag, &camera, viewport, Vec3::ZERO);
        let translation = gizmo.result().translation;
        assert!(translation.x.abs() > 1e-3);
        assert!(translation.y.abs() < 1e-6 && translation.z.abs() < 1e-6);
        assert_eq!(gizmo.result().axis, Vec3::X);
        assert_eq!(gizmo.transform(Vec3::ZERO), Mat4::from_translation(translation));
    }

    #[test]
    fn test_result_axis_follows_hovered_handle() {
        let (camera, viewport) = setup();
        let mut gizmo = Gizmo::new();
        let pointer = PointerState::new(Vec2::new(400.0, 200.0), Vec2::new(3.0, 0.0), false);
        gizmo.apply_pick(encode_handle_id(Axis::Z, HandleKind::Plane), &pointer, &camera, viewport, Vec3::ZERO);
        assert_eq!(gizmo.result().axis, Vec3::Z);
        assert!(gizmo.result().is_identity());

        // a miss keeps the last axis
        gizmo.apply_pick(0, &pointer, &camera, viewport, Vec3::ZERO);
        assert_eq!(gizmo.result().axis, Vec3::Z);

        let press = PointerState::new(Vec2::new(400.0, 200.0), Vec2::ZERO, true);
        gizmo.apply_pick(encode_handle_id(Axis::Y, HandleKind::Axis), &press, &camera, viewport, Vec3::ZERO);
        gizmo.apply_pick(encode_handle_id(Axis::X, HandleKind::Axis), &press, &camera, viewport, Vec3::ZERO);
        assert_eq!(gizmo.result().axis, Vec3::Y);
    }

    #[test]
    fn test_stationary_drag_produces_nothing() {
        let (camera, viewport) = setup();
        let mut gizmo = Gizmo::new();
        let pointer = PointerState::new(Vec2::new(500.0, 260.0), Vec2::ZERO, true);
        let id = encode_handle_id(Axis::Y, HandleKind::Rotation);
        gizmo.apply_pick(id, &pointer, &camera, viewport, Vec3::ZERO);
        gizmo.apply_pick(id, &pointer, &camera, viewport, Vec3::ZERO);
        assert_eq!(gizmo.state(), GizmoState::Active(HandleKind::Rotation));
        assert!(gizmo.result().is_identity());
        assert_eq!(gizmo.result().axis, Vec3::Y);
    }

    #[test]
    fn test_rotation_drag_reports_axis_and_angle() {
        let (camera, viewport) = setup();
        let mut gizmo = Gizmo::new();
        let pivot_screen = camera.world_to_screen(Vec3::ZERO, viewport);
        let start = pivot_screen + Vec2::new(100.0, 0.0);
        let press = PointerState::new(start, Vec2::ZERO, true);
        gizmo.apply_pick(encode_handle_id(Axis::Y, HandleKind::Rotation), &press, &camera, viewport, Vec3::ZERO);

        let drag = PointerState::new(start + Vec2::new(0.0, 30.0), Vec2::new(0.0, 30.0), true);
        gizmo.apply_pick(0, &drag, &camera, viewport, Vec3::ZERO);
        let result = gizmo.result();
        assert_eq!(result.axis, Vec3::Y);
        assert!(result.angle.abs() > 0.1);
        assert_eq!(result.translation, Vec3::ZERO);
    }

    #[test]
    fn test_plane_drag_parallel_ray_stays_zero() {
        // camera level with the pivot: every ray through the projected pivot runs along the XZ plane
        let camera = Camera::new(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO);
        let viewport = Viewport::new(800.0, 450.0);
        let mut gizmo = Gizmo::new();
        let press = PointerState::new(Vec2::new(400.0, 225.0), Vec2::ZERO, true);
        gizmo.apply_pick(encode_handle_id(Axis::Y, HandleKind::Plane), &press, &camera, viewport, Vec3::ZERO);

        let drag = PointerState::new(Vec2::new(410.0, 225.0), Vec2::new(10.0, 0.0), true);
        gizmo.apply_pick(0, &drag, &camera, viewport, Vec3::ZERO);
        assert_eq!(gizmo.state(), GizmoState::Active(HandleKind::Plane));
        assert_eq!(gizmo.result().translation, Vec3::ZERO);
    }

    #[test]
    fn test_with_config_keeps_view() {
        let view = ViewConfig::default().with_size(0.2);
        let gizmo = Gizmo::with_config(view);
        assert_eq!(gizmo.view().size, 0.2);
        assert_eq!(gizmo.state(), GizmoState::Cold);
    }
}
