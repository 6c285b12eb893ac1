//! Flat-color render pipelines for the picking pass and the visible pass.

use crate::mesh::GizmoVertex;
use crate::picking::PICK_TEXTURE_FORMAT;

/// Bind group layout with the single gizmo uniform block.
pub fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Gizmo Bind Group Layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

/// Pipelines sharing one shader module and layout.
pub struct GizmoPipelines {
    pub bind_group_layout: wgpu::BindGroupLayout,
    /// Writes exact id colors into the picking target.
    pub pick: wgpu::RenderPipeline,
    /// Draws into the caller's surface format with alpha blending.
    pub visible: wgpu::RenderPipeline,
}

impl GizmoPipelines {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Gizmo Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/gizmo.wgsl").into()),
        });

        let bind_group_layout = create_bind_group_layout(device);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Gizmo Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pick = create_pipeline(
            device,
            &shader,
            &layout,
            "Gizmo Pick Pipeline",
            wgpu::ColorTargetState {
                format: PICK_TEXTURE_FORMAT,
                blend: None, // No blending for pick buffer
                write_mask: wgpu::ColorWrites::ALL,
            },
        );
        let visible = create_pipeline(
            device,
            &shader,
            &layout,
            "Gizmo Pipeline",
            wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            },
        );

        Self {
            bind_group_layout,
            pick,
            visible,
        }
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    label: &str,
    target: wgpu::ColorTargetState,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[GizmoVertex::desc()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(target)],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None, // Ribbons and plane quads are seen from both sides
            ..wgpu::PrimitiveState::default()
        },
        // Painter's order, no depth test
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
