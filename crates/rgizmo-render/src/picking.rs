//! Offscreen picking target.
//!
//! Handles are rendered into a fixed-size color texture with their id in the red channel.
//! One texel is copied into a small staging buffer and mapped back on the CPU.

use crate::error::{RenderError, RenderResult};

/// Format of the picking texture. Unorm keeps id bytes exact.
pub const PICK_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

// Buffer size must be aligned to COPY_BYTES_PER_ROW_ALIGNMENT (256)
const STAGING_BUFFER_SIZE: u64 = 256;

/// Square color target plus readback buffer.
pub struct PickingTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    staging_buffer: wgpu::Buffer,
    size: u32,
}

impl PickingTarget {
    /// Creates a `size` x `size` picking target.
    ///
    /// Fails if the size exceeds the device limit or if wgpu reports a validation error
    /// while the texture and buffer are created.
    pub fn new(device: &wgpu::Device, size: u32) -> RenderResult<Self> {
        let max = device.limits().max_texture_dimension_2d;
        if size == 0 || size > max {
            return Err(RenderError::TextureCreationFailed(format!(
                "picking target size {size} outside 1..={max}"
            )));
        }

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Gizmo Pick Texture"),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: PICK_TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let staging_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Gizmo Pick Staging Buffer"),
            size: STAGING_BUFFER_SIZE,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            texture.destroy();
            staging_buffer.destroy();
            return Err(RenderError::TextureCreationFailed(error.to_string()));
        }

        Ok(Self {
            texture,
            view,
            staging_buffer,
            size,
        })
    }

    /// Width and height in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Begins a render pass into the target, cleared to id 0.
    pub fn begin_pass<'a>(&'a self, encoder: &'a mut wgpu::CommandEncoder) -> wgpu::RenderPass<'a> {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Gizmo Pick Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT), // Background = id 0
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            ..Default::default()
        })
    }

    /// Reads the id at `(x, y)`, where `y` counts up from the bottom row.
    ///
    /// Coordinates past the edge are clamped. Blocks until the GPU has finished the copy.
    pub fn read_id(&self, device: &wgpu::Device, queue: &wgpu::Queue, x: u32, y: u32) -> RenderResult<u8> {
        let last = self.size - 1;
        let x = x.min(last);
        let row = last - y.min(last);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Gizmo Pick Readback Encoder"),
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y: row, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &self.staging_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(256), // Aligned
                    rows_per_image: Some(1),
                },
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
        queue.submit(std::iter::once(encoder.finish()));

        let slice = self.staging_buffer.slice(..4);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });

        let mapped = device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| RenderError::PollFailed(e.to_string()))
            .and_then(|_| {
                rx.recv()
                    .map_err(|e| RenderError::ReadbackFailed(e.to_string()))?
                    .map_err(|e| RenderError::ReadbackFailed(e.to_string()))
            });
        if let Err(e) = mapped {
            self.cancel_readback();
            return Err(e);
        }

        let data = slice.get_mapped_range();
        let id = data[0];
        drop(data);
        self.staging_buffer.unmap();

        Ok(id)
    }

    /// Aborts a pending map of the staging buffer so the next readback can map it again.
    fn cancel_readback(&self) {
        self.staging_buffer.unmap();
    }

    /// Releases the GPU memory now instead of when the last handle drops.
    pub fn destroy(&self) {
        self.texture.destroy();
        self.staging_buffer.destroy();
    }
}

impl Drop for PickingTarget {
    fn drop(&mut self) {
        self.destroy();
    }
}
