//! Core math and state for rgizmo-rs.
//!
//! This crate has no GPU dependencies. It provides:
//! - [`Camera`] projection and unprojection helpers
//! - [`GizmoGeometry`] handle layout and the color-id encoding used for picking
//! - the hover/drag state machine ([`GizmoState`])
//! - rotation and translation solvers and the [`compose_transform`] composer
//! - the per-instance [`Gizmo`] value tying them together

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Exact zero checks on angles and translations are intended
#![allow(clippy::float_cmp)]
// Short math names like p0/p1 mirror the formulas
#![allow(clippy::similar_names)]

pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gizmo;
pub mod input;
pub mod pick;
pub mod solver;
pub mod state;
pub mod transform;

pub use camera::{Camera, ProjectionMode, Ray, Viewport};
pub use color::Color;
pub use config::ViewConfig;
pub use error::{GizmoError, Result};
pub use geometry::{AxisColors, GizmoGeometry, Handle, HandleColors, HandleSet, Ring};
pub use gizmo::Gizmo;
pub use input::PointerState;
pub use pick::{
    cursor_to_pick_pixel, decode_handle_id, encode_handle_id, id_color, Axis, HandleHit,
    HandleKind, BACKGROUND_ID, PICK_TARGET_SIZE,
};
pub use solver::SOLVER_EPSILON;
pub use state::{GizmoState, Interaction};
pub use transform::{compose_transform, UpdateResult};

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
