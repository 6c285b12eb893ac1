//! Error types for rgizmo-rs.

use thiserror::Error;

/// The main error type for gizmo operations.
#[derive(Error, Debug)]
pub enum GizmoError {
    /// The picking resources have not been loaded.
    #[error("gizmo resources not loaded - call GizmoContext::load() first")]
    NotInitialized,

    /// The offscreen picking target could not be created.
    #[error("failed to create picking target: {0}")]
    TargetCreation(String),

    /// Rendering or readback error.
    #[error("render error: {0}")]
    RenderError(String),

    /// A view configuration value is out of range.
    #[error("invalid view configuration: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for gizmo operations.
pub type Result<T> = std::result::Result<T, GizmoError>;
