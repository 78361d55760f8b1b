//! Rendering error types.

use std::path::PathBuf;

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

    /// Failed to create surface.
    #[error("failed to create surface: {0}")]
    SurfaceCreationFailed(#[from] wgpu::CreateSurfaceError),

    /// A shader source file could not be read.
    #[error("failed to read shader '{}': {source}", path.display())]
    ShaderSourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Shader compilation or pipeline validation failed.
    #[error("shader compilation failed: {0}")]
    ShaderCompilationFailed(String),

    /// Vertex buffer allocation failed.
    #[error("buffer allocation failed: {0}")]
    BufferAllocationFailed(String),

    /// The buffer was already released.
    #[error("buffer '{0}' was already released")]
    BufferReleased(String),
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
