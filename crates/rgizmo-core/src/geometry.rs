//! Handle geometry around a pivot.
//!
//! The gizmo keeps a constant apparent size: its world-space radius is
//! `size * distance(camera, pivot)`. Everything here is a pure function of the pivot, the
//! camera and the [`ViewConfig`], and the picking pass and the visible pass must consume the
//! same [`GizmoGeometry`] so that hit geometry matches what is drawn.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};

use crate::camera::Camera;
use crate::color::Color;
use crate::config::ViewConfig;
use crate::pick::{id_color, Axis, HandleKind};
use crate::state::GizmoState;

/// One of the three colors a handle kind uses, indexed by axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisColors {
    pub x: Color,
    pub y: Color,
    pub z: Color,
}

impl AxisColors {
    #[must_use]
    pub fn get(&self, axis: Axis) -> Color {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    fn palette(highlighted: Option<Axis>) -> Self {
        let pick = |axis, base| {
            if highlighted == Some(axis) {
                Color::WHITE
            } else {
                base
            }
        };
        Self {
            x: pick(Axis::X, Color::RED),
            y: pick(Axis::Y, Color::GREEN),
            z: pick(Axis::Z, Color::BLUE),
        }
    }

    fn ids(kind: HandleKind) -> Self {
        Self {
            x: id_color(Axis::X, kind),
            y: id_color(Axis::Y, kind),
            z: id_color(Axis::Z, kind),
        }
    }
}

/// Colors for every handle of the gizmo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleColors {
    pub rotation: AxisColors,
    pub axis: AxisColors,
    pub plane: AxisColors,
}

impl HandleColors {
    /// Flat id colors for the picking pass.
    #[must_use]
    pub fn picking() -> Self {
        Self {
            rotation: AxisColors::ids(HandleKind::Rotation),
            axis: AxisColors::ids(HandleKind::Axis),
            plane: AxisColors::ids(HandleKind::Plane),
        }
    }

    /// Visible colors: the hot or active handle turns white, the rest use the axis palette.
    #[must_use]
    pub fn for_state(state: GizmoState, axis: Axis) -> Self {
        let highlighted = |kind| (state.kind() == Some(kind)).then_some(axis);
        Self {
            rotation: AxisColors::palette(highlighted(HandleKind::Rotation)),
            axis: AxisColors::palette(highlighted(HandleKind::Axis)),
            plane: AxisColors::palette(highlighted(HandleKind::Plane)),
        }
    }

    #[must_use]
    pub fn get(&self, kind: HandleKind) -> &AxisColors {
        match kind {
            HandleKind::Rotation => &self.rotation,
            HandleKind::Axis => &self.axis,
            HandleKind::Plane => &self.plane,
        }
    }
}

/// A draggable element regenerated every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Anchor point: the tip base of an axis handle or the center of a plane handle.
    pub position: Vec3,
    /// The axis this handle manipulates.
    pub axis: Axis,
    pub color: Color,
    pub dist_to_camera: f32,
}

impl Handle {
    #[must_use]
    pub fn new(position: Vec3, axis: Axis, color: Color, camera_position: Vec3) -> Self {
        Self {
            position,
            axis,
            color,
            dist_to_camera: position.distance(camera_position),
        }
    }

    /// Orders handles farther first; equal distances keep X < Y < Z.
    fn draws_before(&self, other: &Handle) -> bool {
        self.dist_to_camera > other.dist_to_camera
            || (self.dist_to_camera == other.dist_to_camera
                && self.axis.index() < other.axis.index())
    }
}

/// Exactly three handles of one kind, sorted back to front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleSet {
    handles: [Handle; 3],
}

impl HandleSet {
    /// Sorts three handles with a three-comparator network.
    #[must_use]
    pub fn sorted(mut h0: Handle, mut h1: Handle, mut h2: Handle) -> Self {
        if h1.draws_before(&h0) {
            std::mem::swap(&mut h0, &mut h1);
        }
        if h2.draws_before(&h1) {
            std::mem::swap(&mut h1, &mut h2);
        }
        if h1.draws_before(&h0) {
            std::mem::swap(&mut h0, &mut h1);
        }
        Self {
            handles: [h0, h1, h2],
        }
    }

    /// Handles in paint order.
    pub fn iter(&self) -> impl Iterator<Item = &Handle> {
        self.handles.iter()
    }
}

/// A rotation ring: a full circle around the pivot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub center: Vec3,
    /// Normal of the ring plane.
    pub axis: Axis,
    pub radius: f32,
    pub color: Color,
}

impl Ring {
    /// Point on the ring at `angle` radians, measured in the plane of the other two axes.
    #[must_use]
    pub fn point_at(&self, angle: f32) -> Vec3 {
        let (u, v) = self.axis.others();
        self.center + (u.unit() * angle.cos() + v.unit() * angle.sin()) * self.radius
    }
}

/// World-space dimensions and handles of a gizmo for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GizmoGeometry {
    pub pivot: Vec3,
    pub camera_position: Vec3,
    /// World-space gizmo radius.
    pub radius: f32,
    pub axis_handles: HandleSet,
    pub plane_handles: HandleSet,
    pub rings: [Ring; 3],
    pub tip_length: f32,
    pub tip_radius: f32,
    /// Edge length of a plane handle.
    pub plane_size: f32,
}

impl GizmoGeometry {
    /// Lays out every handle around `pivot`.
    #[must_use]
    pub fn new(view: &ViewConfig, camera: &Camera, pivot: Vec3, colors: &HandleColors) -> Self {
        let eye = camera.position;
        let radius = view.size * eye.distance(pivot);

        let length = radius * view.axis_handle_length;
        let axis_handle =
            |axis: Axis| Handle::new(pivot + axis.unit() * length, axis, colors.axis.get(axis), eye);
        let axis_handles = HandleSet::sorted(
            axis_handle(Axis::X),
            axis_handle(Axis::Y),
            axis_handle(Axis::Z),
        );

        let offset = radius * view.plane_handle_offset;
        let plane_handle = |axis: Axis| {
            let (u, v) = axis.others();
            let position = pivot + (u.unit() + v.unit()) * offset;
            Handle::new(position, axis, colors.plane.get(axis), eye)
        };
        let plane_handles = HandleSet::sorted(
            plane_handle(Axis::X),
            plane_handle(Axis::Y),
            plane_handle(Axis::Z),
        );

        let rings = Axis::ALL.map(|axis| Ring {
            center: pivot,
            axis,
            radius,
            color: colors.rotation.get(axis),
        });

        Self {
            pivot,
            camera_position: eye,
            radius,
            axis_handles,
            plane_handles,
            rings,
            tip_length: radius * view.axis_handle_tip_length,
            tip_radius: radius * view.axis_handle_tip_radius,
            plane_size: radius * view.plane_handle_size,
        }
    }

    /// End point of the cone tip of an axis handle.
    #[must_use]
    pub fn tip_end(&self, handle: &Handle) -> Vec3 {
        handle.position + handle.axis.unit() * self.tip_length
    }

    /// Corners of a plane handle, counter-clockwise.
    ///
    /// A unit quad in the XZ plane is turned 90 degrees about an orientation axis so that it
    /// ends up normal to the handle's axis, then scaled and moved to the handle position.
    #[must_use]
    pub fn plane_corners(&self, handle: &Handle) -> [Vec3; 4] {
        let orientation = match handle.axis {
            Axis::X => Vec3::Z,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::X,
        };
        let rotation = Quat::from_axis_angle(orientation, FRAC_PI_2);
        let half = self.plane_size * 0.5;
        [
            Vec3::new(-half, 0.0, -half),
            Vec3::new(-half, 0.0, half),
            Vec3::new(half, 0.0, half),
            Vec3::new(half, 0.0, -half),
        ]
        .map(|corner| handle.position + rotation * corner)
    }
}
