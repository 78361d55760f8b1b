//! Configuration options for vecscope.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SandboxError};
use crate::geometry::{GridConfig, GridStep};
use crate::store::VectorStore;

/// Startup configuration, read once before the window opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Initial grid parameters.
    pub grid: GridConfig,

    /// Value used by the "New Vector" default action.
    pub default_vector: Vec3,

    /// Color used by the "New Vector" default action.
    pub default_color: Vec3,

    /// Append the result of `=` to the vector list.
    pub append_sum: bool,

    /// Color of an appended sum.
    pub sum_color: Vec3,

    /// Clear color.
    pub background_color: Vec3,

    /// Line width hint for the grid.
    pub grid_line_width: f32,

    /// Line width hint for the vector arrows. Must exceed `grid_line_width`.
    pub vector_line_width: f32,

    /// Camera settings.
    pub camera: CameraOptions,

    /// Optional WGSL vertex shader file; the built-in shader is used if unset.
    pub vertex_shader: Option<PathBuf>,

    /// Optional WGSL fragment shader file.
    pub fragment_shader: Option<PathBuf>,

    /// Window title.
    pub window_title: String,

    /// Initial window size in logical pixels.
    pub window_size: [u32; 2],
}

impl Default for Options {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            default_vector: Vec3::new(0.5, 0.5, 0.5),
            default_color: Vec3::new(1.0, 0.3, 0.2),
            append_sum: false,
            sum_color: Vec3::new(1.0, 0.85, 0.1),
            background_color: Vec3::ZERO,
            grid_line_width: 1.0,
            vector_line_width: 3.0,
            camera: CameraOptions::default(),
            vertex_shader: None,
            fragment_shader: None,
            window_title: "vecscope".to_string(),
            window_size: [1280, 720],
        }
    }
}

/// Camera settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    /// Start position.
    pub position: Vec3,
    /// Start yaw in degrees (-90 looks down -Z).
    pub yaw_degrees: f32,
    /// Start pitch in degrees.
    pub pitch_degrees: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Movement speed in units per second.
    pub move_speed: f32,
    /// Degrees of rotation per pixel of mouse motion.
    pub mouse_sensitivity: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            yaw_degrees: -90.0,
            pitch_degrees: 0.0,
            fov_degrees: 60.0,
            near: 0.1,
            far: 100.0,
            move_speed: 0.5,
            mouse_sensitivity: 0.1,
        }
    }
}

impl Options {
    /// Parses options from JSON. Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let options = Self::from_json_str(&json)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Checks value ranges that would otherwise produce a degenerate scene.
    pub fn validate(&self) -> Result<()> {
        if !(self.grid.edge > 0.0) {
            return Err(SandboxError::invalid("grid.edge", "must be greater than zero"));
        }
        if let GridStep::Fixed(step) = self.grid.step {
            if !(step > 0.0) {
                return Err(SandboxError::invalid("grid.step", "fixed step must be greater than zero"));
            }
        }
        if !(self.camera.near > 0.0 && self.camera.near < self.camera.far) {
            return Err(SandboxError::invalid("camera.near", "must satisfy 0 < near < far"));
        }
        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            return Err(SandboxError::invalid("camera.fov_degrees", "must be within (0, 180)"));
        }
        if !(self.grid_line_width > 0.0 && self.vector_line_width > 0.0) {
            return Err(SandboxError::invalid("line_width", "must be greater than zero"));
        }
        if self.vector_line_width <= self.grid_line_width {
            return Err(SandboxError::invalid(
                "vector_line_width",
                "must be greater than grid_line_width",
            ));
        }
        if self.vertex_shader.is_some() != self.fragment_shader.is_some() {
            return Err(SandboxError::invalid(
                "vertex_shader",
                "vertex and fragment shader paths must be set together",
            ));
        }
        Ok(())
    }

    /// Creates an empty vector store honoring `append_sum`.
    #[must_use]
    pub fn vector_store(&self) -> VectorStore {
        let store =
            VectorStore::new().with_default_vector(self.default_vector, self.default_color);
        if self.append_sum {
            store.with_sum_appended(self.sum_color)
        } else {
            store
        }
    }
}
