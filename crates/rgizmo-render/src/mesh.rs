//! Tessellation of gizmo handles into flat-colored triangles.
//!
//! wgpu has no wide lines, so every line is a ribbon facing the camera whose width is
//! converted from pixels with [`Camera::world_units_per_pixel`]. The same mesh feeds the
//! picking pass and the visible pass; only the colors differ.

use glam::{Vec2, Vec3};
use rgizmo_core::{
    Camera, Color, GizmoGeometry, GizmoState, Handle, HandleKind, ProjectionMode, Ring,
    ViewConfig, Viewport,
};

/// Number of sides of an axis handle's cone tip.
pub const CONE_SIDES: u32 = 16;

/// Number of line segments per rotation ring.
pub const RING_SEGMENTS: u32 = 64;

/// Half-length of the line drawn through the pivot along the dragged axis.
pub const ACTIVE_AXIS_HALF_LENGTH: f32 = 1000.0;

/// How the shader interprets a vertex position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexMode {
    /// World-space position.
    World,
    /// World-space position on a rotation ring; the back half is discarded.
    Ring,
    /// Position already in normalized device coordinates.
    Screen,
}

impl VertexMode {
    fn as_f32(self) -> f32 {
        match self {
            VertexMode::World => 0.0,
            VertexMode::Ring => 1.0,
            VertexMode::Screen => 2.0,
        }
    }
}

/// Vertex layout consumed by `gizmo.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GizmoVertex {
    pub position: [f32; 3],
    pub mode: f32,
    pub color: [f32; 4],
}

impl GizmoVertex {
    #[must_use]
    pub fn new(position: Vec3, mode: VertexMode, color: Color) -> Self {
        Self {
            position: position.to_array(),
            mode: mode.as_f32(),
            color: color.to_f32_array(),
        }
    }

    /// Vertex buffer layout for a pipeline.
    #[must_use]
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GizmoVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position (vec3)
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // mode (f32)
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 12,
                    shader_location: 1,
                },
                // color (vec4)
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 16,
                    shader_location: 2,
                },
            ],
        }
    }
}

/// Accumulates triangles for one pass.
pub struct MeshBuilder<'a> {
    camera: &'a Camera,
    viewport: Viewport,
    vertices: Vec<GizmoVertex>,
}

impl<'a> MeshBuilder<'a> {
    #[must_use]
    pub fn new(camera: &'a Camera, viewport: Viewport) -> Self {
        Self {
            camera,
            viewport,
            vertices: Vec::new(),
        }
    }

    pub fn triangle(&mut self, corners: [Vec3; 3], mode: VertexMode, color: Color) {
        self.vertices
            .extend(corners.map(|p| GizmoVertex::new(p, mode, color)));
    }

    /// Two triangles over four corners given in order around the quad.
    pub fn quad(&mut self, corners: [Vec3; 4], mode: VertexMode, color: Color) {
        let [a, b, c, d] = corners;
        self.triangle([a, b, c], mode, color);
        self.triangle([a, c, d], mode, color);
    }

    /// A camera-facing ribbon `thickness` pixels wide.
    pub fn line(&mut self, start: Vec3, end: Vec3, thickness: f32, mode: VertexMode, color: Color) {
        let half_start = 0.5 * thickness * self.camera.world_units_per_pixel(start, self.viewport);
        let half_end = 0.5 * thickness * self.camera.world_units_per_pixel(end, self.viewport);
        self.ribbon(start, end, half_start, half_end, mode, color);
    }

    /// A camera-facing ribbon of constant world width, sized to `thickness` pixels at `anchor`.
    pub fn line_at(
        &mut self,
        start: Vec3,
        end: Vec3,
        anchor: Vec3,
        thickness: f32,
        mode: VertexMode,
        color: Color,
    ) {
        let half = 0.5 * thickness * self.camera.world_units_per_pixel(anchor, self.viewport);
        self.ribbon(start, end, half, half, mode, color);
    }

    fn ribbon(
        &mut self,
        start: Vec3,
        end: Vec3,
        half_start: f32,
        half_end: f32,
        mode: VertexMode,
        color: Color,
    ) {
        let view_dir = match self.camera.projection_mode {
            ProjectionMode::Perspective => (start + end) * 0.5 - self.camera.position,
            ProjectionMode::Orthographic => self.camera.forward(),
        };
        let side = (end - start).cross(view_dir).normalize_or_zero();
        self.quad(
            [
                start - side * half_start,
                end - side * half_end,
                end + side * half_end,
                start + side * half_start,
            ],
            mode,
            color,
        );
    }

    /// A closed cone from a circular base to `tip`.
    pub fn cone(&mut self, base: Vec3, tip: Vec3, radius: f32, color: Color) {
        let axis = (tip - base).normalize_or_zero();
        let (u, v) = axis.any_orthonormal_pair();
        let rim = |i: u32| {
            #[allow(clippy::cast_precision_loss)]
            let angle = std::f32::consts::TAU * i as f32 / CONE_SIDES as f32;
            base + (u * angle.cos() + v * angle.sin()) * radius
        };
        for i in 0..CONE_SIDES {
            let a = rim(i);
            let b = rim(i + 1);
            self.triangle([base, b, a], VertexMode::World, color);
            self.triangle([a, b, tip], VertexMode::World, color);
        }
    }

    /// A rotation ring drawn as a loop of ribbons.
    pub fn ring(&mut self, ring: &Ring, thickness: f32) {
        for i in 0..RING_SEGMENTS {
            #[allow(clippy::cast_precision_loss)]
            let step = std::f32::consts::TAU / RING_SEGMENTS as f32;
            #[allow(clippy::cast_precision_loss)]
            let (a, b) = (i as f32 * step, (i + 1) as f32 * step);
            self.line(
                ring.point_at(a),
                ring.point_at(b),
                thickness,
                VertexMode::Ring,
                ring.color,
            );
        }
    }

    /// A line between two window-pixel positions.
    pub fn screen_line(&mut self, start: Vec2, end: Vec2, thickness: f32, color: Color) {
        let side = (end - start).perp().normalize_or_zero() * (0.5 * thickness);
        let viewport = self.viewport;
        let to_ndc = |p: Vec2| {
            Vec3::new(
                p.x / viewport.width * 2.0 - 1.0,
                1.0 - p.y / viewport.height * 2.0,
                0.0,
            )
        };
        let corners = [
            to_ndc(start - side),
            to_ndc(end - side),
            to_ndc(end + side),
            to_ndc(start + side),
        ];
        self.quad(corners, VertexMode::Screen, color);
    }

    fn axis_handle(&mut self, geometry: &GizmoGeometry, handle: &Handle, thickness: f32) {
        self.line(
            geometry.pivot,
            handle.position,
            thickness,
            VertexMode::World,
            handle.color,
        );
        self.cone(
            handle.position,
            geometry.tip_end(handle),
            geometry.tip_radius,
            handle.color,
        );
    }

    #[must_use]
    pub fn finish(self) -> Vec<GizmoVertex> {
        self.vertices
    }
}

/// Triangles for every handle, in draw order: plane handles, rings, axis handles.
#[must_use]
pub fn build_handle_mesh(
    geometry: &GizmoGeometry,
    camera: &Camera,
    viewport: Viewport,
    view: &ViewConfig,
) -> Vec<GizmoVertex> {
    let mut builder = MeshBuilder::new(camera, viewport);

    for handle in geometry.plane_handles.iter() {
        builder.quad(geometry.plane_corners(handle), VertexMode::World, handle.color);
    }
    for ring in &geometry.rings {
        builder.ring(ring, view.handle_draw_thickness);
    }
    for handle in geometry.axis_handles.iter() {
        builder.axis_handle(geometry, handle, view.handle_draw_thickness);
    }

    builder.finish()
}

/// Visible-pass extras while dragging: the active axis line and, for rotation, a line from
/// the projected pivot to the cursor.
#[must_use]
pub fn build_drag_overlay(
    state: GizmoState,
    axis: Vec3,
    pivot: Vec3,
    cursor: Vec2,
    camera: &Camera,
    viewport: Viewport,
    view: &ViewConfig,
) -> Vec<GizmoVertex> {
    let mut builder = MeshBuilder::new(camera, viewport);
    let thickness = view.active_axis_draw_thickness;

    if matches!(
        state.dragging(),
        Some(HandleKind::Rotation | HandleKind::Axis)
    ) {
        let reach = axis * ACTIVE_AXIS_HALF_LENGTH;
        builder.line_at(
            pivot - reach,
            pivot + reach,
            pivot,
            thickness,
            VertexMode::World,
            Color::WHITE,
        );
    }
    if state.dragging() == Some(HandleKind::Rotation) {
        let pivot_screen = camera.world_to_screen(pivot, viewport);
        builder.screen_line(pivot_screen, cursor, thickness, Color::WHITE);
    }

    builder.finish()
}

/// Uniform block consumed by `gizmo.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GizmoUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    pub pivot: [f32; 4],
}

impl GizmoUniforms {
    #[must_use]
    pub fn new(camera: &Camera, viewport: Viewport, pivot: Vec3) -> Self {
        Self {
            view_proj: camera
                .view_projection_matrix(viewport.aspect_ratio())
                .to_cols_array_2d(),
            camera_pos: camera.position.extend(1.0).to_array(),
            pivot: pivot.extend(1.0).to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rgizmo_core::{decode_handle_id, Axis, HandleColors, HandleHit};
    use std::collections::BTreeSet;

    const QUAD: usize = 6;
    const CONE: usize = CONE_SIDES as usize * 6;
    const RING: usize = RING_SEGMENTS as usize * QUAD;

    fn setup() -> (Camera, Viewport, ViewConfig) {
        (
            Camera::new(Vec3::splat(5.0), Vec3::ZERO),
            Viewport::new(800.0, 450.0),
            ViewConfig::default(),
        )
    }

    fn id_of(vertex: &GizmoVertex) -> Option<HandleHit> {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let id = (vertex.color[0] * 255.0).round() as u8;
        decode_handle_id(id)
    }

    #[test]
    fn test_vertex_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<GizmoVertex>(), 32);
        assert_eq!(std::mem::size_of::<GizmoUniforms>(), 96);
    }

    #[test]
    fn test_handle_mesh_draw_order() {
        let (camera, viewport, view) = setup();
        let geometry = GizmoGeometry::new(&view, &camera, Vec3::ZERO, &HandleColors::picking());
        let mesh = build_handle_mesh(&geometry, &camera, viewport, &view);
        assert_eq!(mesh.len(), 3 * QUAD + 3 * RING + 3 * (QUAD + CONE));

        let planes = &mesh[..3 * QUAD];
        assert!(planes
            .iter()
            .all(|v| id_of(v).map(|h| h.kind) == Some(HandleKind::Plane)));

        let rings = &mesh[3 * QUAD..3 * QUAD + 3 * RING];
        assert!(rings.iter().all(|v| v.mode == 1.0));
        assert!(rings
            .iter()
            .all(|v| id_of(v).map(|h| h.kind) == Some(HandleKind::Rotation)));

        let axes = &mesh[3 * QUAD + 3 * RING..];
        assert!(axes.iter().all(|v| v.mode == 0.0));
        assert!(axes
            .iter()
            .all(|v| id_of(v).map(|h| h.kind) == Some(HandleKind::Axis)));
    }

    #[test]
    fn test_plane_handles_drawn_back_to_front() {
        let (_, viewport, view) = setup();
        let camera = Camera::new(Vec3::new(6.0, 2.0, 1.0), Vec3::ZERO);
        let geometry = GizmoGeometry::new(&view, &camera, Vec3::ZERO, &HandleColors::picking());
        let mesh = build_handle_mesh(&geometry, &camera, viewport, &view);

        // X plane sits at (0, o, o), the farthest from a camera on +X
        assert_eq!(id_of(&mesh[0]), Some(HandleHit::new(Axis::X, HandleKind::Plane)));
    }

    #[test]
    fn test_overlay_only_while_dragging() {
        let (camera, viewport, view) = setup();
        let overlay = |state| {
            build_drag_overlay(state, Vec3::X, Vec3::ZERO, Vec2::new(500.0, 200.0), &camera, viewport, &view)
        };
        assert!(overlay(GizmoState::Cold).is_empty());
        assert!(overlay(GizmoState::Hot(HandleKind::Axis)).is_empty());
        assert!(overlay(GizmoState::Active(HandleKind::Plane)).is_empty());

        let axis_drag = overlay(GizmoState::Active(HandleKind::Axis));
        assert_eq!(axis_drag.len(), QUAD);
        assert!(axis_drag.iter().all(|v| v.color == Color::WHITE.to_f32_array()));

        let rotation_drag = overlay(GizmoState::Active(HandleKind::Rotation));
        assert_eq!(rotation_drag.len(), 2 * QUAD);
        assert!(rotation_drag[QUAD..].iter().all(|v| v.mode == 2.0));
    }

    #[test]
    fn test_screen_line_maps_to_ndc() {
        let (camera, viewport, _) = setup();
        let mut builder = MeshBuilder::new(&camera, viewport);
        builder.screen_line(Vec2::new(0.0, 225.0), Vec2::new(800.0, 225.0), 2.0, Color::WHITE);
        let mesh = builder.finish();
        for vertex in &mesh {
            assert!((vertex.position[0].abs() - 1.0).abs() < 1e-6);
            assert!(vertex.position[1].abs() < 0.01);
        }
    }

    #[test]
    fn test_ribbon_width_follows_pixels() {
        let (camera, viewport, _) = setup();
        let mut builder = MeshBuilder::new(&camera, viewport);
        builder.line(Vec3::ZERO, Vec3::X, 10.0, VertexMode::World, Color::RED);
        let mesh = builder.finish();
        let a = Vec3::from_array(mesh[0].position);
        let d = Vec3::from_array(mesh[5].position);
        let expected = 10.0 * camera.world_units_per_pixel(Vec3::ZERO, viewport);
        assert!((a.distance(d) - expected).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_pick_mesh_ids_decode_to_every_handle(
            eye in prop::array::uniform3(-20.0f32..20.0),
            pivot in prop::array::uniform3(-5.0f32..5.0),
        ) {
            let (eye, pivot) = (Vec3::from_array(eye), Vec3::from_array(pivot));
            prop_assume!(eye.distance(pivot) > 1.0);
            let (_, viewport, view) = setup();
            let camera = Camera::new(eye, pivot);
            let geometry = GizmoGeometry::new(&view, &camera, pivot, &HandleColors::picking());
            let mesh = build_handle_mesh(&geometry, &camera, viewport, &view);

            let mut seen = BTreeSet::new();
            for vertex in &mesh {
                let hit = id_of(vertex);
                prop_assert!(hit.is_some());
                seen.extend(hit.map(HandleHit::id));
            }
            prop_assert_eq!(seen.len(), 9);
        }
    }
}
