//! Caller-owned rendering context for gizmos.

use rgizmo_core::{
    cursor_to_pick_pixel, Camera, Gizmo, GizmoError, HandleColors, PointerState, Result, Vec2,
    Vec3, Viewport, PICK_TARGET_SIZE,
};
use rgizmo_render::{
    build_drag_overlay, build_handle_mesh, request_headless_device, GizmoRenderer,
    GizmoUniforms, RenderError,
};

fn render_error(error: RenderError) -> GizmoError {
    GizmoError::RenderError(error.to_string())
}

/// Owns the device handles and the picking resources shared by every gizmo.
///
/// Resources are created by [`GizmoContext::load`] (or lazily by [`GizmoContext::create`])
/// and released by [`GizmoContext::unload`] or when the context is dropped. Several contexts
/// can coexist; gizmos are plain values and can be used with any loaded context.
pub struct GizmoContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_format: wgpu::TextureFormat,
    renderer: Option<GizmoRenderer>,
}

impl GizmoContext {
    /// Wraps an existing device. Nothing is allocated until [`GizmoContext::load`].
    pub fn new(device: wgpu::Device, queue: wgpu::Queue, surface_format: wgpu::TextureFormat) -> Self {
        Self {
            device,
            queue,
            surface_format,
            renderer: None,
        }
    }

    /// Creates a context on a headless device, blocking until the device is ready.
    pub fn headless(surface_format: wgpu::TextureFormat) -> Result<Self> {
        let (device, queue) = pollster::block_on(request_headless_device()).map_err(render_error)?;
        Ok(Self::new(device, queue, surface_format))
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    pub fn is_loaded(&self) -> bool {
        self.renderer.is_some()
    }

    /// Creates the picking target and pipelines. Loading twice only logs a warning.
    pub fn load(&mut self) -> Result<()> {
        if self.renderer.is_some() {
            log::warn!("gizmo resources already loaded");
            return Ok(());
        }

        match GizmoRenderer::new(&self.device, self.surface_format) {
            Ok(renderer) => {
                self.renderer = Some(renderer);
                log::info!("gizmo resources loaded ({PICK_TARGET_SIZE}x{PICK_TARGET_SIZE} picking target)");
                Ok(())
            }
            Err(e) => {
                log::error!("failed to create gizmo picking target: {e}");
                Err(GizmoError::TargetCreation(e.to_string()))
            }
        }
    }

    /// Releases the picking resources. Unloading twice only logs a warning.
    pub fn unload(&mut self) {
        if self.release() {
            log::info!("gizmo resources unloaded");
        } else {
            log::warn!("gizmo resources already unloaded");
        }
    }

    fn release(&mut self) -> bool {
        match self.renderer.take() {
            Some(renderer) => {
                renderer.picking_target().destroy();
                true
            }
            None => false,
        }
    }

    fn renderer(&self) -> Result<&GizmoRenderer> {
        self.renderer.as_ref().ok_or(GizmoError::NotInitialized)
    }

    /// Returns a gizmo with the default view configuration, loading resources if needed.
    pub fn create(&mut self) -> Result<Gizmo> {
        if !self.is_loaded() {
            self.load()?;
        }
        Ok(Gizmo::new())
    }

    /// Renders the picking pass and returns the raw id under `cursor`.
    pub fn pick_id(
        &self,
        gizmo: &Gizmo,
        camera: &Camera,
        viewport: Viewport,
        cursor: Vec2,
        pivot: Vec3,
    ) -> Result<u8> {
        let renderer = self.renderer()?;
        let geometry = gizmo.geometry(camera, pivot, &HandleColors::picking());
        let mesh = build_handle_mesh(&geometry, camera, viewport, gizmo.view());
        let uniforms = GizmoUniforms::new(camera, viewport, pivot);
        let pixel = cursor_to_pick_pixel(cursor, viewport, renderer.picking_target().size());
        renderer
            .pick(&self.device, &self.queue, &mesh, &uniforms, pixel)
            .map_err(render_error)
    }

    /// Runs picking, the state machine and the solvers for one frame.
    ///
    /// Blocks on the pick readback. The result is available through [`Gizmo::result`] and
    /// [`Gizmo::transform`].
    pub fn update(
        &self,
        gizmo: &mut Gizmo,
        camera: &Camera,
        viewport: Viewport,
        pointer: &PointerState,
        pivot: Vec3,
    ) -> Result<()> {
        let id = self.pick_id(gizmo, camera, viewport, pointer.position, pivot)?;
        gizmo.apply_pick(id, pointer, camera, viewport, pivot);
        Ok(())
    }

    /// Records the visible gizmo into `encoder`, on top of whatever `target` holds.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        gizmo: &Gizmo,
        camera: &Camera,
        viewport: Viewport,
        pointer: &PointerState,
        pivot: Vec3,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
    ) -> Result<()> {
        let renderer = self.renderer()?;
        let geometry = gizmo.geometry(camera, pivot, &gizmo.colors());
        let mut mesh = build_handle_mesh(&geometry, camera, viewport, gizmo.view());
        mesh.extend(build_drag_overlay(
            gizmo.state(),
            gizmo.axis().unit(),
            pivot,
            pointer.position,
            camera,
            viewport,
            gizmo.view(),
        ));
        let uniforms = GizmoUniforms::new(camera, viewport, pivot);
        renderer.draw(&self.device, encoder, target, &mesh, &uniforms);
        Ok(())
    }
}

impl Drop for GizmoContext {
    fn drop(&mut self) {
        if self.release() {
            log::debug!("gizmo resources released on drop");
        }
    }
}
