//! Error type for the application layer.

use thiserror::Error;

/// Everything that can stop vecscope from starting or running.
#[derive(Error, Debug)]
pub enum AppError {
    /// The configuration file could not be read or is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] vecscope_core::SandboxError),

    /// GPU setup, shader or buffer failure.
    #[error("render error: {0}")]
    Render(#[from] vecscope_render::RenderError),

    /// The event loop could not be created or stopped abnormally.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The window could not be created.
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
}

/// A specialized Result type for the application layer.
pub type AppResult<T> = std::result::Result<T, AppError>;
