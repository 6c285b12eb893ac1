//! Handle ids for color-coded picking.
//!
//! Every handle is rendered into the picking target with a flat color whose red channel is
//! its id. Reading back the red byte under the cursor identifies the hovered handle.
//! An id packs the axis and the handle kind as `axis_index * 4 + kind`; kind 0 is reserved
//! so that a cleared pixel (id 0) never resolves to a handle.

use glam::{Vec2, Vec3};

use crate::camera::Viewport;
use crate::color::Color;

/// Width and height of the picking target in pixels, independent of the window size.
pub const PICK_TARGET_SIZE: u32 = 512;

/// Picked id of a pixel where no handle was drawn.
pub const BACKGROUND_ID: u8 = 0;

/// One of the canonical world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in insertion order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns 0, 1 or 2.
    #[must_use]
    pub fn index(self) -> u8 {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }

    /// Returns the unit vector for this axis.
    #[must_use]
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Returns the two other axes, in X < Y < Z order.
    #[must_use]
    pub fn others(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }
}

/// The three kinds of handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// Rotation ring around an axis.
    Rotation,
    /// Translation arrow along an axis.
    Axis,
    /// Translation patch in the plane normal to an axis.
    Plane,
}

impl HandleKind {
    pub const ALL: [HandleKind; 3] = [HandleKind::Rotation, HandleKind::Axis, HandleKind::Plane];

    /// Returns the id nibble: 1, 2 or 3.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            HandleKind::Rotation => 1,
            HandleKind::Axis => 2,
            HandleKind::Plane => 3,
        }
    }

    /// Decodes a kind nibble; 0 and out-of-range values are not handles.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(HandleKind::Rotation),
            2 => Some(HandleKind::Axis),
            3 => Some(HandleKind::Plane),
            _ => None,
        }
    }
}

/// A decoded picking hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleHit {
    pub axis: Axis,
    pub kind: HandleKind,
}

impl HandleHit {
    #[must_use]
    pub fn new(axis: Axis, kind: HandleKind) -> Self {
        Self { axis, kind }
    }

    /// Returns the picking id of this handle.
    #[must_use]
    pub fn id(self) -> u8 {
        encode_handle_id(self.axis, self.kind)
    }
}

/// Encodes an axis and kind into a picking id.
#[must_use]
pub fn encode_handle_id(axis: Axis, kind: HandleKind) -> u8 {
    axis.index() * 4 + kind.code()
}

/// Decodes a picking id. Returns `None` for the background and for ids no handle uses.
#[must_use]
pub fn decode_handle_id(id: u8) -> Option<HandleHit> {
    let axis = Axis::from_index(id / 4)?;
    let kind = HandleKind::from_code(id % 4)?;
    Some(HandleHit { axis, kind })
}

/// Flat picking color for a handle.
#[must_use]
pub fn id_color(axis: Axis, kind: HandleKind) -> Color {
    Color::new(encode_handle_id(axis, kind), 0, 0, 0)
}

/// Maps a window cursor position to a picking-target pixel.
///
/// The returned coordinates have their origin at the bottom-left of the target. Each
/// normalized coordinate is clamped to `[0, 1]` and the pixel to `[0, size - 1]`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn cursor_to_pick_pixel(cursor: Vec2, viewport: Viewport, size: u32) -> (u32, u32) {
    let x_fract = (cursor.x / viewport.width).clamp(0.0, 1.0);
    let y_fract = (1.0 - cursor.y / viewport.height).clamp(0.0, 1.0);
    let last = size.saturating_sub(1);
    let x = ((size as f32 * x_fract) as u32).min(last);
    let y = ((size as f32 * y_fract) as u32).min(last);
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_id_roundtrip() {
        for axis in Axis::ALL {
            for kind in HandleKind::ALL {
                let id = encode_handle_id(axis, kind);
                assert_eq!(decode_handle_id(id), Some(HandleHit::new(axis, kind)));
            }
        }
    }

    #[test]
    fn test_specific_ids() {
        assert_eq!(encode_handle_id(Axis::X, HandleKind::Axis), 2);
        assert_eq!(encode_handle_id(Axis::Z, HandleKind::Rotation), 9);
        assert_eq!(encode_handle_id(Axis::Z, HandleKind::Plane), 11);
    }

    #[test]
    fn test_background_never_resolves() {
        assert_eq!(decode_handle_id(BACKGROUND_ID), None);
        assert_eq!(decode_handle_id(4), None);
        assert_eq!(decode_handle_id(8), None);
        assert_eq!(decode_handle_id(12), None);
        assert_eq!(Color::TRANSPARENT.r, BACKGROUND_ID);
    }

    #[test]
    fn test_cursor_mapping_flips_vertical() {
        let viewport = Viewport::new(800.0, 450.0);
        assert_eq!(cursor_to_pick_pixel(Vec2::ZERO, viewport, 512), (0, 511));
        assert_eq!(
            cursor_to_pick_pixel(Vec2::new(800.0, 450.0), viewport, 512),
            (511, 0)
        );
        assert_eq!(
            cursor_to_pick_pixel(Vec2::new(400.0, 225.0), viewport, 512),
            (256, 256)
        );
    }

    #[test]
    fn test_cursor_mapping_clamps_outside_window() {
        let viewport = Viewport::new(800.0, 450.0);
        assert_eq!(
            cursor_to_pick_pixel(Vec2::new(-50.0, 900.0), viewport, 512),
            (0, 0)
        );
        assert_eq!(
            cursor_to_pick_pixel(Vec2::new(5000.0, -10.0), viewport, 512),
            (511, 511)
        );
    }

    proptest! {
        #[test]
        fn prop_decoded_ids_reencode(id in 0u8..=255) {
            if let Some(hit) = decode_handle_id(id) {
                prop_assert_eq!(hit.id(), id);
                prop_assert!(id != BACKGROUND_ID);
            } else {
                prop_assert!(id % 4 == 0 || id / 4 > 2);
            }
        }
    }
}
