//! Converts 2D cursor motion into a rotation angle or a translation.
//!
//! Every solver guards its divisions with [`SOLVER_EPSILON`]. A degenerate configuration
//! (parallel ray and plane, zero-length screen vectors) yields "no change this frame",
//! never an error.

use glam::{Vec2, Vec3};

use crate::camera::{Camera, Ray, Viewport};

/// Threshold below which denominators and cross products count as zero.
pub const SOLVER_EPSILON: f32 = 1e-6;

/// Signed rotation angle in radians for a cursor moving around the projected pivot.
///
/// The angle is measured between the pivot-to-cursor vectors of the previous and the
/// current frame. It is negated when the pivot lies farther along `axis` than the camera,
/// so that the ring turns the same way the cursor does when seen from behind.
#[must_use]
pub fn rotation_angle(
    pivot_screen: Vec2,
    cursor: Vec2,
    cursor_delta: Vec2,
    axis: Vec3,
    pivot: Vec3,
    camera_position: Vec3,
) -> f32 {
    let p1 = cursor - pivot_screen;
    let p0 = p1 - cursor_delta;
    if p1.length() < SOLVER_EPSILON || p0.length() < SOLVER_EPSILON {
        return 0.0;
    }

    let dot = p1.normalize().dot(p0.normalize()).clamp(-1.0, 1.0);
    let mut angle = 0.0;
    if 1.0 - dot.abs() > SOLVER_EPSILON {
        angle = dot.acos();
        let cross = p1.perp_dot(p0);
        if cross.abs() < SOLVER_EPSILON {
            angle = 0.0;
        } else if cross < 0.0 {
            angle = -angle;
        }
    }

    if axis.dot(pivot) > axis.dot(camera_position) {
        angle = -angle;
    }
    angle
}

/// Ray from the camera through the projected pivot shifted by the cursor delta.
#[must_use]
pub fn drag_ray(camera: &Camera, viewport: Viewport, pivot: Vec3, cursor_delta: Vec2) -> Ray {
    let screen = camera.world_to_screen(pivot, viewport) + cursor_delta;
    camera.screen_ray(screen, viewport)
}

/// Translation along the line through `pivot` with direction `axis`.
///
/// Finds the point of the line closest to `ray`: the plane containing the ray and the
/// common perpendicular of both lines is intersected with the axis line. Returns `None`
/// when the line is parallel to that plane.
#[must_use]
pub fn axis_translation(ray: Ray, pivot: Vec3, axis: Vec3) -> Option<Vec3> {
    let common = ray.direction.cross(axis).normalize_or_zero();
    let plane_normal = ray.direction.cross(common).normalize_or_zero();

    let denom = plane_normal.dot(axis);
    if denom.abs() <= SOLVER_EPSILON {
        return None;
    }
    let k = -plane_normal.dot(pivot - ray.origin) / denom;
    Some(axis * k)
}

/// Translation within the plane through `pivot` with normal `normal`.
///
/// Only intersections in front of the ray origin count.
#[must_use]
pub fn plane_translation(ray: Ray, pivot: Vec3, normal: Vec3) -> Option<Vec3> {
    let denom = ray.direction.dot(normal);
    if denom.abs() <= SOLVER_EPSILON {
        return None;
    }
    let t = (pivot - ray.origin).dot(normal) / denom;
    (t > 0.0).then(|| ray.at(t) - pivot)
}
