//! Rendering backend for rgizmo-rs.
//!
//! This crate provides the wgpu side of the gizmo:
//! - [`PickingTarget`] offscreen id texture with single-texel readback
//! - [`GizmoPipelines`] flat-color pipelines for picking and drawing
//! - [`build_handle_mesh`] tessellation of handles into camera-facing triangles
//! - [`GizmoRenderer`] tying them together

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Renderer methods take many wgpu handles
#![allow(clippy::too_many_arguments)]
#![allow(clippy::float_cmp)]

pub mod buffer;
pub mod device;
pub mod error;
pub mod mesh;
pub mod picking;
pub mod pipeline;
pub mod renderer;

pub use device::request_headless_device;
pub use error::{RenderError, RenderResult};
pub use mesh::{
    build_drag_overlay, build_handle_mesh, GizmoUniforms, GizmoVertex, MeshBuilder, VertexMode,
};
pub use picking::{PickingTarget, PICK_TEXTURE_FORMAT};
pub use pipeline::GizmoPipelines;
pub use renderer::GizmoRenderer;
