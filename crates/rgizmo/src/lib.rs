//! rgizmo: an interactive translate/rotate gizmo for wgpu applications.
//!
//! A gizmo shows three rotation rings, three axis arrows and three plane patches around a
//! pivot. Each frame it renders its handles into a small offscreen target with unique id
//! colors, reads back the id under the cursor, and turns cursor motion into a rotation or a
//! translation.
//!
//! # Quick Start
//!
//! ```no_run
//! use rgizmo::*;
//!
//! fn frame(
//!     ctx: &GizmoContext,
//!     gizmo: &mut Gizmo,
//!     camera: &Camera,
//!     pointer: &PointerState,
//!     model: &mut Mat4,
//! ) -> Result<()> {
//!     let viewport = Viewport::new(1280.0, 720.0);
//!     let pivot = model.w_axis.truncate();
//!     ctx.update(gizmo, camera, viewport, pointer, pivot)?;
//!     *model = gizmo.transform(pivot) * *model;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`GizmoContext`] owns the device handles and the picking resources
//! - [`Gizmo`] is a plain value holding one instance's configuration and interaction state
//! - [`PointerTracker`] turns winit events into per-frame [`PointerState`] snapshots

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod context;
mod input;

pub use context::GizmoContext;
pub use input::PointerTracker;

// Re-export core types
pub use rgizmo_core::{
    compose_transform, Axis, Camera, Color, Gizmo, GizmoError, GizmoGeometry, GizmoState,
    HandleColors, HandleHit, HandleKind, PointerState, ProjectionMode, Ray, Result,
    UpdateResult, ViewConfig, Viewport, BACKGROUND_ID, PICK_TARGET_SIZE,
};
pub use rgizmo_core::{Mat4, Quat, Vec2, Vec3, Vec4};

// Re-export render types
pub use rgizmo_render::{request_headless_device, RenderError};
