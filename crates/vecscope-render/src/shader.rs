//! Shader management.
//!
//! [`ShaderProgram`] is the line pipeline plus its `model`/`view`/`projection`
//! uniforms. Programs are built from WGSL, either the sources bundled with
//! this crate or a vertex/fragment file pair on disk.

use std::path::Path;

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::error::{RenderError, RenderResult};
use crate::line_buffer::LineBuffer;

/// Depth format used by every pass that draws lines.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

const BUILTIN_VERTEX: &str = include_str!("shaders/line.vert.wgsl");
const BUILTIN_FRAGMENT: &str = include_str!("shaders/line.frag.wgsl");

/// Matrix uniforms shared by all line draws.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MatrixUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl Default for MatrixUniforms {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }
}

impl MatrixUniforms {
    /// Byte offset of the named matrix, or `None` for an unknown name.
    #[must_use]
    pub fn offset_of(name: &str) -> Option<wgpu::BufferAddress> {
        let index = match name {
            "model" => 0,
            "view" => 1,
            "projection" => 2,
            _ => return None,
        };
        Some(index * 64)
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut [[f32; 4]; 4]> {
        match name {
            "model" => Some(&mut self.model),
            "view" => Some(&mut self.view),
            "projection" => Some(&mut self.projection),
            _ => None,
        }
    }
}

/// Vertex stage entry point every line shader must expose.
pub const VERTEX_ENTRY: &str = "vs_main";

/// Fragment stage entry point every line shader must expose.
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Builder for creating shader programs.
pub struct ShaderBuilder {
    vertex_source: Option<String>,
    fragment_source: Option<String>,
    label: Option<String>,
}

impl ShaderBuilder {
    /// Creates a new shader builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vertex_source: None,
            fragment_source: None,
            label: None,
        }
    }

    /// Creates a builder holding the bundled line shaders.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new()
            .with_vertex(BUILTIN_VERTEX)
            .with_fragment(BUILTIN_FRAGMENT)
            .with_label("line shader")
    }

    /// Sets the vertex shader source (WGSL).
    #[must_use]
    pub fn with_vertex(mut self, source: impl Into<String>) -> Self {
        self.vertex_source = Some(source.into());
        self
    }

    /// Sets the fragment shader source (WGSL).
    #[must_use]
    pub fn with_fragment(mut self, source: impl Into<String>) -> Self {
        self.fragment_source = Some(source.into());
        self
    }

    /// Reads the vertex shader source from a file.
    pub fn with_vertex_file(self, path: impl AsRef<Path>) -> RenderResult<Self> {
        Ok(self.with_vertex(read_source(path.as_ref())?))
    }

    /// Reads the fragment shader source from a file.
    pub fn with_fragment_file(self, path: impl AsRef<Path>) -> RenderResult<Self> {
        Ok(self.with_fragment(read_source(path.as_ref())?))
    }

    /// Sets the shader label for debugging.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Builds the shader module (does not create pipeline).
    pub fn build_module(&self, device: &wgpu::Device) -> RenderResult<wgpu::ShaderModule> {
        let source = self.combined_source()?;

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: self.label.as_deref(),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        Ok(module)
    }

    fn combined_source(&self) -> RenderResult<String> {
        let vertex = self
            .vertex_source
            .as_ref()
            .ok_or_else(|| RenderError::ShaderCompilationFailed("missing vertex shader".into()))?;

        let fragment = self.fragment_source.as_ref().ok_or_else(|| {
            RenderError::ShaderCompilationFailed("missing fragment shader".into())
        })?;

        // If sources are the same file, just return one
        if vertex == fragment {
            return Ok(vertex.clone());
        }

        Ok(format!("{vertex}\n\n{fragment}"))
    }
}

impl Default for ShaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn read_source(path: &Path) -> RenderResult<String> {
    std::fs::read_to_string(path).map_err(|source| RenderError::ShaderSourceUnreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// The line pipeline and its matrix uniforms.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    uniforms: MatrixUniforms,
}

impl ShaderProgram {
    /// Builds the program from the bundled shaders.
    pub fn builtin(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> RenderResult<Self> {
        Self::build(device, color_format, &ShaderBuilder::builtin())
    }

    /// Builds the program from a vertex and a fragment WGSL file.
    pub fn from_files(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> RenderResult<Self> {
        let builder = ShaderBuilder::new()
            .with_vertex_file(vertex_path)?
            .with_fragment_file(fragment_path)?
            .with_label("line shader (file)");
        Self::build(device, color_format, &builder)
    }

    /// Compiles `builder` and creates the line pipeline.
    ///
    /// Compilation and validation errors are captured and returned instead
    /// of reaching the device's uncaptured error handler.
    pub fn build(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        builder: &ShaderBuilder,
    ) -> RenderResult<Self> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = builder.build_module(device);
        let program = module.map(|module| Self::create(device, color_format, builder, &module));

        let scope_error = pollster::block_on(device.pop_error_scope());
        let program = program?;
        if let Some(error) = scope_error {
            return Err(RenderError::ShaderCompilationFailed(error.to_string()));
        }

        log::debug!(
            "built shader program '{}'",
            builder.label.as_deref().unwrap_or("unnamed")
        );
        Ok(program)
    }

    fn create(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        builder: &ShaderBuilder,
        module: &wgpu::ShaderModule,
    ) -> Self {
        let uniforms = MatrixUniforms::default();
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("matrix uniforms"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("matrix bind group layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<MatrixUniforms>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("matrix bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("line pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_layouts = LineBuffer::vertex_layouts();
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module,
                entry_point: Some(VERTEX_ENTRY),
                buffers: &vertex_layouts,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module,
                entry_point: Some(FRAGMENT_ENTRY),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None, // Lines have no front/back
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group,
            uniform_buffer,
            uniforms,
        }
    }

    /// Activates the program for the following draws in `pass`.
    pub fn use_program(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
    }

    /// Uploads the named matrix (`model`, `view` or `projection`).
    ///
    /// Returns false and uploads nothing for an unknown name.
    pub fn set_mat4(&mut self, queue: &wgpu::Queue, name: &str, value: Mat4) -> bool {
        let (Some(offset), Some(slot)) = (MatrixUniforms::offset_of(name), self.uniforms.slot_mut(name))
        else {
            log::warn!("unknown matrix uniform '{name}'");
            return false;
        };
        *slot = value.to_cols_array_2d();
        queue.write_buffer(&self.uniform_buffer, offset, bytemuck::bytes_of(slot));
        true
    }

    /// The CPU copy of the uploaded matrices.
    #[must_use]
    pub fn uniforms(&self) -> &MatrixUniforms {
        &self.uniforms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<MatrixUniforms>(), 192);
        assert_eq!(MatrixUniforms::offset_of("model"), Some(0));
        assert_eq!(MatrixUniforms::offset_of("view"), Some(64));
        assert_eq!(MatrixUniforms::offset_of("projection"), Some(128));
        assert_eq!(MatrixUniforms::offset_of("normal"), None);
    }

    #[test]
    fn test_builtin_source_has_both_stages() {
        let source = ShaderBuilder::builtin().combined_source().unwrap();
        assert!(source.contains("fn vs_main"));
        assert!(source.contains("fn fs_main"));
    }

    #[test]
    fn test_missing_fragment() {
        let err = ShaderBuilder::new().with_vertex("x").combined_source().unwrap_err();
        assert!(matches!(err, RenderError::ShaderCompilationFailed(_)));
    }

    #[test]
    fn test_unreadable_file() {
        let err = ShaderBuilder::new()
            .with_vertex_file("/nonexistent/line.vert.wgsl")
            .err()
            .unwrap();
        assert!(matches!(err, RenderError::ShaderSourceUnreadable { .. }));
    }
}
