//! Rendering error types.

use thiserror::Error;

/// Errors that can occur during rendering operations.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to create wgpu adapter.
    #[error("failed to create graphics adapter")]
    AdapterCreationFailed,

    /// Failed to create wgpu device.
    #[error("failed to create graphics device: {0}")]
    DeviceCreationFailed(#[from] wgpu::RequestDeviceError),

    /// Pipeline or shader creation failed.
    #[error("pipeline creation failed: {0}")]
    PipelineCreationFailed(String),

    /// Picking texture or staging buffer creation failed.
    #[error("texture creation failed: {0}")]
    TextureCreationFailed(String),

    /// Mapping the staging buffer failed.
    #[error("pick readback failed: {0}")]
    ReadbackFailed(String),

    /// Waiting on the device failed.
    #[error("device poll failed: {0}")]
    PollFailed(String),
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
