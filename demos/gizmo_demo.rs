//! Gizmo demo: move and turn a wireframe cube.
//!
//! Left mouse drives the gizmo. Middle mouse orbits the camera, shift + middle mouse pans,
//! the wheel zooms.
//!
//! Run with: cargo run --example gizmo_demo

use std::sync::Arc;

use pollster::FutureExt;
use rgizmo::*;
use rgizmo_render::buffer::{create_uniform_buffer, create_vertex_buffer, update_uniform_buffer};
use rgizmo_render::{GizmoPipelines, GizmoUniforms, MeshBuilder, VertexMode};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 3), (3, 2), (2, 0),
    (4, 5), (5, 7), (7, 6), (6, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// Flat-color wireframe drawn with the gizmo's own visible pipeline.
struct CubeRenderer {
    pipelines: GizmoPipelines,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl CubeRenderer {
    fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let pipelines = GizmoPipelines::new(device, format);
        let uniform_buffer = create_uniform_buffer(
            device,
            &GizmoUniforms::new(&Camera::default(), Viewport::new(1.0, 1.0), Vec3::ZERO),
            Some("cube uniforms"),
        );
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cube bind group"),
            layout: &pipelines.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        Self {
            pipelines,
            uniform_buffer,
            bind_group,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        camera: &Camera,
        viewport: Viewport,
        model: Mat4,
    ) {
        update_uniform_buffer(
            queue,
            &self.uniform_buffer,
            &GizmoUniforms::new(camera, viewport, Vec3::ZERO),
        );

        let corners: Vec<Vec3> = (0..8)
            .map(|i| {
                let corner = Vec3::new(
                    if i & 1 == 0 { -0.5 } else { 0.5 },
                    if i & 2 == 0 { -0.5 } else { 0.5 },
                    if i & 4 == 0 { -0.5 } else { 0.5 },
                );
                model.transform_point3(corner)
            })
            .collect();
        let mut builder = MeshBuilder::new(camera, viewport);
        for (a, b) in CUBE_EDGES {
            builder.line(
                corners[a],
                corners[b],
                2.0,
                VertexMode::World,
                Color::new(200, 200, 200, 255),
            );
        }
        let mesh = builder.finish();
        let vertex_buffer = create_vertex_buffer(device, &mesh, Some("cube vertices"));

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: 0.1,
                        g: 0.1,
                        b: 0.12,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            ..Default::default()
        });
        pass.set_pipeline(&self.pipelines.visible);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        let count = u32::try_from(mesh.len()).unwrap_or(u32::MAX);
        pass.draw(0..count, 0..1);
    }
}

/// Turns the camera about its target: `yaw` around `up`, `pitch` around the camera's right.
fn orbit(camera: &mut Camera, yaw: f32, pitch: f32) {
    let offset = Quat::from_axis_angle(camera.up, -yaw) * (camera.position - camera.target);
    let right = offset.cross(camera.up).normalize_or(Vec3::X);
    let pitched = Quat::from_axis_angle(right, pitch) * offset;
    // stop short of the poles, where `up` and the view direction line up
    let offset = if pitched.normalize_or_zero().dot(camera.up).abs() < 0.99 {
        pitched
    } else {
        offset
    };
    camera.position = camera.target + offset;
}

/// Slides camera and target together by a cursor delta in pixels.
fn pan(camera: &mut Camera, delta: Vec2) {
    let forward = camera.forward();
    let right = forward.cross(camera.up).normalize_or(Vec3::X);
    let up = right.cross(forward);
    let scale = camera.position.distance(camera.target) * 0.002;
    let offset = (up * delta.y - right * delta.x) * scale;
    camera.position += offset;
    camera.target += offset;
}

/// Moves toward the target by a fraction of the current distance per wheel step.
fn dolly(camera: &mut Camera, steps: f32) {
    let distance = camera.position.distance(camera.target);
    let distance = (distance * (1.0 - 0.1 * steps)).max(0.1);
    camera.position = camera.target - camera.forward() * distance;
}

struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    gizmos: GizmoContext,
    cube: CubeRenderer,
}

impl Gpu {
    async fn new(window: Arc<Window>) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..wgpu::InstanceDescriptor::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .expect("failed to create surface");
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("failed to find an adapter");
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("gizmo demo device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
            })
            .await
            .expect("failed to create device");

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let cube = CubeRenderer::new(&device, format);
        let mut gizmos = GizmoContext::new(device, queue, format);
        gizmos.load().expect("failed to load gizmo resources");

        Self {
            window,
            surface,
            config,
            gizmos,
            cube,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(self.gizmos.device(), &self.config);
    }

    fn viewport(&self) -> Viewport {
        Viewport::from((self.config.width, self.config.height))
    }
}

struct App {
    gpu: Option<Gpu>,
    gizmo: Gizmo,
    camera: Camera,
    pointer: PointerTracker,
    model: Mat4,
    middle_down: bool,
    shift_down: bool,
    last_cursor: Option<Vec2>,
}

impl App {
    fn new() -> Self {
        Self {
            gpu: None,
            gizmo: Gizmo::new(),
            camera: Camera::new(Vec3::splat(5.0), Vec3::ZERO),
            pointer: PointerTracker::new(),
            model: Mat4::IDENTITY,
            middle_down: false,
            shift_down: false,
            last_cursor: None,
        }
    }

    fn navigate(&mut self, cursor: Vec2) {
        let delta = self.last_cursor.map_or(Vec2::ZERO, |last| cursor - last);
        self.last_cursor = Some(cursor);
        if !self.middle_down || self.gizmo.state().is_dragging() {
            return;
        }
        if self.shift_down {
            pan(&mut self.camera, delta);
        } else {
            orbit(&mut self.camera, delta.x * 0.01, delta.y * 0.01);
        }
    }

    fn frame(&mut self) {
        let Some(gpu) = &self.gpu else {
            return;
        };
        let viewport = gpu.viewport();
        let pointer = self.pointer.state();

        let pivot = self.model.w_axis.truncate();
        if let Err(e) = gpu
            .gizmos
            .update(&mut self.gizmo, &self.camera, viewport, &pointer, pivot)
        {
            log::error!("gizmo update failed: {e}");
            return;
        }
        self.model = self.gizmo.transform(pivot) * self.model;
        let pivot = self.model.w_axis.truncate();

        let output = match gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(gpu.gizmos.device(), &gpu.config);
                return;
            }
            Err(e) => {
                log::warn!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let device = gpu.gizmos.device();
        let queue = gpu.gizmos.queue();
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("demo encoder"),
        });

        gpu.cube.draw(
            device,
            queue,
            &mut encoder,
            &view,
            &self.camera,
            viewport,
            self.model,
        );
        if let Err(e) = gpu.gizmos.draw(
            &self.gizmo,
            &self.camera,
            viewport,
            &pointer,
            pivot,
            &mut encoder,
            &view,
        ) {
            log::error!("gizmo draw failed: {e}");
        }

        queue.submit(std::iter::once(encoder.finish()));
        output.present();
        self.pointer.end_frame();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        let window_attributes = Window::default_attributes()
            .with_title("rgizmo demo")
            .with_inner_size(LogicalSize::new(1280, 720));
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .expect("failed to create window"),
        );
        self.gpu = Some(Gpu::new(window).block_on());
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        self.pointer.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.gizmos.unload();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift_down = modifiers.state().shift_key();
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Middle,
                ..
            } => {
                self.middle_down = state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let cursor = Vec2::new(position.x as f32, position.y as f32);
                self.navigate(cursor);
            }
            WindowEvent::CursorLeft { .. } => {
                self.last_cursor = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    #[allow(clippy::cast_possible_truncation)]
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 50.0,
                };
                dolly(&mut self.camera, amount);
            }
            WindowEvent::RedrawRequested => {
                self.frame();
                if let Some(gpu) = &self.gpu {
                    gpu.window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn main() {
    let _ = env_logger::try_init();

    let event_loop = EventLoop::new().expect("failed to create event loop");
    let mut app = App::new();
    event_loop.run_app(&mut app).expect("event loop error");
}
