//! vecscope: an interactive 3D vector sandbox.
//!
//! vecscope draws a coordinate grid and user vectors as lines in a free-look
//! 3D view. A side panel adds and edits vectors and runs a small calculator
//! that sums them.
//!
//! # Quick Start
//!
//! ```no_run
//! fn main() -> vecscope::AppResult<()> {
//!     // Reads the configuration from argv[1] or VECSCOPE_CONFIG
//!     vecscope::run()
//! }
//! ```
//!
//! # Controls
//!
//! - `W`/`A`/`S`/`D`: move forward, left, back, right
//! - `Space`/`E` and `Q`: move up and down
//! - Right mouse drag: look around
//! - `Esc`: quit

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]

mod app;
pub mod error;
mod init;
pub mod ui_sync;

pub use app::{run_app, App, AppState, GeometryUpdates};
pub use error::{AppError, AppResult};
pub use init::{config_path, load_options, run, CONFIG_ENV};

// Re-export core types
pub use vecscope_core::{
    generate_arrows, generate_grid, CalcState, GridConfig, GridStep, LineSet, Operator, Options,
    UserVector, VectorStore,
};

// Re-export render types
pub use vecscope_render::{FlyCamera, LineBuffer, RenderEngine, RenderError, ShaderProgram};

// Re-export glam types for convenience
pub use vecscope_core::{Mat4, Vec3};
