//! UI layer for vecscope using egui.

pub mod integration;
pub mod intent;
pub mod panels;

pub use integration::EguiIntegration;
pub use intent::{UiButton, UiCheckbox, UiIntent, VectorDraft};
pub use panels::*;
