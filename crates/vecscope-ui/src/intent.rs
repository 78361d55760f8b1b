//! Discrete user actions produced by the UI.

/// Buttons on the sandbox panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiButton {
    /// Add a vector from the draft value/color.
    NewVector,
    /// Add a vector with the configured default value/color.
    NewDefaultVector,
    /// `+`
    Add,
    /// `*`
    Multiply,
    /// `=`
    Equals,
    /// Remove every vector and reset the calculator.
    Clear,
}

impl UiButton {
    /// Button caption.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            UiButton::NewVector => "Add Vector",
            UiButton::NewDefaultVector => "New Vector",
            UiButton::Add => "+",
            UiButton::Multiply => "*",
            UiButton::Equals => "=",
            UiButton::Clear => "Clear",
        }
    }
}

/// Checkboxes on the sandbox panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCheckbox {
    /// Show the XZ plane sweep.
    PlaneXz,
    /// Show the YZ plane sweep.
    PlaneYz,
}

/// One edge-triggered user action. Each press or edit yields exactly one intent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiIntent {
    ButtonPressed(UiButton),
    CheckboxToggled(UiCheckbox, bool),
    FloatVectorEdited { index: usize, value: [f32; 3] },
    ColorEdited { index: usize, color: [f32; 4] },
}

/// Value and color typed into the "new vector" fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorDraft {
    pub value: [f32; 3],
    pub color: [f32; 3],
}

impl Default for VectorDraft {
    fn default() -> Self {
        Self {
            value: [1.0, 0.0, 0.0],
            color: [0.2, 0.6, 1.0],
        }
    }
}
