//! Core model for vecscope.
//!
//! This crate holds everything that does not touch the GPU:
//! - [`generate_grid`] and [`generate_arrows`], which turn parameters into [`LineSet`]s
//! - [`VectorStore`], the user vector list and its pairwise-sum calculator
//! - [`Options`], the startup configuration

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod geometry;
pub mod options;
pub mod store;

pub use error::{Result, SandboxError};
pub use geometry::{generate_arrows, generate_grid, GridConfig, GridStep, LineSet, GRID_COLOR};
pub use options::{CameraOptions, Options};
pub use store::{CalcState, Calculation, Operator, UserVector, VectorStore};

// Re-export glam types for convenience
pub use glam::{Mat4, Vec3};
