//! Rendering backend for vecscope.
//!
//! This crate provides the wgpu side of the sandbox:
//! - [`LineBuffer`]: GPU vertex buffers mirroring a [`vecscope_core::LineSet`]
//! - [`ShaderProgram`]: the line pipeline and its matrix uniforms
//! - [`FlyCamera`]: the free-look camera
//! - [`RenderEngine`]: device, surface and depth target

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]

pub mod camera;
pub mod engine;
pub mod error;
pub mod line_buffer;
pub mod shader;

pub use camera::FlyCamera;
pub use engine::RenderEngine;
pub use error::{RenderError, RenderResult};
pub use line_buffer::LineBuffer;
pub use shader::{MatrixUniforms, ShaderBuilder, ShaderProgram, DEPTH_FORMAT};
