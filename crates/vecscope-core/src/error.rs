//! Error types for vecscope.

use thiserror::Error;

/// The main error type for vecscope's core operations.
#[derive(Error, Debug)]
pub enum SandboxError {
    /// An option failed validation.
    #[error("invalid option '{name}': {reason}")]
    InvalidOption {
        name: &'static str,
        reason: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SandboxError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            name,
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for vecscope operations.
pub type Result<T> = std::result::Result<T, SandboxError>;
