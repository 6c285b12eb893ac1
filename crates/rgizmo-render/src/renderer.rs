//! Picking and visible passes over a tessellated gizmo.

use rgizmo_core::PICK_TARGET_SIZE;

use crate::buffer::{create_uniform_buffer, create_vertex_buffer};
use crate::error::{RenderError, RenderResult};
use crate::mesh::{GizmoUniforms, GizmoVertex};
use crate::picking::PickingTarget;
use crate::pipeline::GizmoPipelines;

/// GPU resources shared by every gizmo drawn with one device.
///
/// Uniforms are per call: each pick and draw binds its own buffer, so several gizmos can be
/// recorded into one encoder before it is submitted.
pub struct GizmoRenderer {
    pipelines: GizmoPipelines,
    picking: PickingTarget,
}

impl GizmoRenderer {
    /// Creates the picking target and pipelines.
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> RenderResult<Self> {
        let picking = PickingTarget::new(device, PICK_TARGET_SIZE)?;

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipelines = GizmoPipelines::new(device, surface_format);
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(RenderError::PipelineCreationFailed(error.to_string()));
        }

        log::debug!(
            "gizmo renderer ready: {PICK_TARGET_SIZE}x{PICK_TARGET_SIZE} pick target, surface {surface_format:?}"
        );

        Ok(Self { pipelines, picking })
    }

    pub fn picking_target(&self) -> &PickingTarget {
        &self.picking
    }

    /// Renders `mesh` with id colors and reads back the id at `pixel` (bottom-left origin).
    pub fn pick(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        mesh: &[GizmoVertex],
        uniforms: &GizmoUniforms,
        pixel: (u32, u32),
    ) -> RenderResult<u8> {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Gizmo Pick Encoder"),
        });
        {
            let mut pass = self.picking.begin_pass(&mut encoder);
            self.record(device, &mut pass, &self.pipelines.pick, mesh, uniforms);
        }
        queue.submit(std::iter::once(encoder.finish()));

        self.picking.read_id(device, queue, pixel.0, pixel.1)
    }

    /// Records the visible pass into `encoder`, drawing over the contents of `target`.
    pub fn draw(
        &self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        mesh: &[GizmoVertex],
        uniforms: &GizmoUniforms,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Gizmo Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            ..Default::default()
        });
        self.record(device, &mut pass, &self.pipelines.visible, mesh, uniforms);
    }

    fn record(
        &self,
        device: &wgpu::Device,
        pass: &mut wgpu::RenderPass<'_>,
        pipeline: &wgpu::RenderPipeline,
        mesh: &[GizmoVertex],
        uniforms: &GizmoUniforms,
    ) {
        if mesh.is_empty() {
            return;
        }
        let vertex_buffer = create_vertex_buffer(device, mesh, Some("Gizmo Vertices"));
        let uniform_buffer = create_uniform_buffer(device, uniforms, Some("Gizmo Uniforms"));
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Gizmo Bind Group"),
            layout: &self.pipelines.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let count = u32::try_from(mesh.len()).unwrap_or(u32::MAX);

        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        pass.draw(0..count, 0..1);
    }
}
