//! Per-frame rigid transform produced by a gizmo.

use glam::{Mat4, Vec3};

/// Output of one gizmo update: a rotation about an axis and a translation.
///
/// `translation` and `angle` are zero unless a drag moved the gizmo this frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UpdateResult {
    /// Translation in world units.
    pub translation: Vec3,
    /// Unit axis of the handle last hovered or dragged. Zero before the first update.
    pub axis: Vec3,
    /// Rotation angle in radians.
    pub angle: f32,
}

impl UpdateResult {
    /// Whether applying this result would leave an object where it is.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.angle == 0.0 && self.translation == Vec3::ZERO
    }

    /// Composes this result into a matrix anchored at `pivot`.
    #[must_use]
    pub fn to_matrix(&self, pivot: Vec3) -> Mat4 {
        compose_transform(pivot, self.axis, self.angle, self.translation)
    }
}

/// Rotation by `angle` about `axis` through `pivot`, followed by `translation`.
///
/// The caller left-multiplies an object's transform by the result. A zero angle or a zero
/// axis contributes no rotation.
#[must_use]
pub fn compose_transform(pivot: Vec3, axis: Vec3, angle: f32, translation: Vec3) -> Mat4 {
    let axis = axis.normalize_or_zero();
    let rotation = if angle == 0.0 || axis == Vec3::ZERO {
        Mat4::IDENTITY
    } else {
        Mat4::from_translation(pivot)
            * Mat4::from_axis_angle(axis, angle)
            * Mat4::from_translation(-pivot)
    };
    Mat4::from_translation(translation) * rotation
}
