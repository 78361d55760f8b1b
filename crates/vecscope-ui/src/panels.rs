//! UI panel builders.
//!
//! Panels never mutate application state. They read the current store and
//! grid config and report what the user did as [`UiIntent`]s.

use egui::{CollapsingHeader, Context, DragValue, SidePanel, Ui};
use vecscope_core::{CalcState, GridConfig, VectorStore};

use crate::intent::{UiButton, UiCheckbox, UiIntent, VectorDraft};

/// Builds the main left panel.
pub fn build_left_panel(ctx: &Context, build_contents: impl FnOnce(&mut Ui)) {
    SidePanel::left("vecscope_main_panel")
        .default_width(280.0)
        .resizable(true)
        .show(ctx, |ui| {
            ui.heading("vecscope");
            ui.separator();
            build_contents(ui);
        });
}

/// Builds the whole sandbox panel and appends this frame's intents.
pub fn build_sandbox_panel(
    ctx: &Context,
    grid: &GridConfig,
    store: &VectorStore,
    draft: &mut VectorDraft,
    intents: &mut Vec<UiIntent>,
) {
    build_left_panel(ctx, |ui| {
        build_grid_section(ui, grid, intents);
        build_new_vector_section(ui, draft, intents);
        build_calculator_section(ui, store, intents);
        build_vector_list_section(ui, store, intents);
    });
}

fn button(ui: &mut Ui, which: UiButton, intents: &mut Vec<UiIntent>) {
    if ui.button(which.label()).clicked() {
        intents.push(UiIntent::ButtonPressed(which));
    }
}

/// Builds the grid plane toggles.
pub fn build_grid_section(ui: &mut Ui, grid: &GridConfig, intents: &mut Vec<UiIntent>) {
    CollapsingHeader::new("Grid")
        .default_open(true)
        .show(ui, |ui| {
            let mut xz = grid.enable_xz;
            if ui.checkbox(&mut xz, "XZ plane").changed() {
                intents.push(UiIntent::CheckboxToggled(UiCheckbox::PlaneXz, xz));
            }
            let mut yz = grid.enable_yz;
            if ui.checkbox(&mut yz, "YZ plane").changed() {
                intents.push(UiIntent::CheckboxToggled(UiCheckbox::PlaneYz, yz));
            }
        });
}

/// Builds the draft fields and the buttons that add vectors.
pub fn build_new_vector_section(ui: &mut Ui, draft: &mut VectorDraft, intents: &mut Vec<UiIntent>) {
    CollapsingHeader::new("New Vector")
        .default_open(true)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                for (axis, value) in ["x", "y", "z"].iter().zip(draft.value.iter_mut()) {
                    ui.add(DragValue::new(value).speed(0.05).prefix(format!("{axis}: ")));
                }
            });
            ui.horizontal(|ui| {
                ui.label("Color:");
                ui.color_edit_button_rgb(&mut draft.color);
            });
            ui.horizontal(|ui| {
                button(ui, UiButton::NewVector, intents);
                button(ui, UiButton::NewDefaultVector, intents);
            });
        });
}

/// Builds the calculator buttons and the state readout.
pub fn build_calculator_section(ui: &mut Ui, store: &VectorStore, intents: &mut Vec<UiIntent>) {
    CollapsingHeader::new("Calculator")
        .default_open(true)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                button(ui, UiButton::Add, intents);
                button(ui, UiButton::Multiply, intents);
                button(ui, UiButton::Equals, intents);
                button(ui, UiButton::Clear, intents);
            });

            let calculation = store.calculation();
            match store.state() {
                CalcState::OperatorPending => {
                    ui.label(format!("pending: {:?}", calculation.operand_indices));
                }
                CalcState::Idle if !calculation.operand_indices.is_empty() => {
                    ui.label(format!("last: {:?}", calculation.operand_indices));
                }
                CalcState::Idle => {}
            }
            if let Some(sum) = store.last_sum() {
                ui.monospace(format!("sum = ({:.3}, {:.3}, {:.3})", sum.x, sum.y, sum.z));
            }
        });
}

/// Builds one editable row per vector.
pub fn build_vector_list_section(ui: &mut Ui, store: &VectorStore, intents: &mut Vec<UiIntent>) {
    CollapsingHeader::new(format!("Vectors ({})", store.len()))
        .id_salt("vectors")
        .default_open(true)
        .show(ui, |ui| {
            let count = store.len();
            for (index, vector) in store.vectors().iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.label(format!("#{index}"));

                    let mut value = vector.value.to_array();
                    let mut edited = false;
                    for component in &mut value {
                        edited |= ui.add(DragValue::new(component).speed(0.05)).changed();
                    }
                    if edited {
                        intents.push(UiIntent::FloatVectorEdited { index, value });
                    }

                    let mut color = vector.color.extend(1.0).to_array();
                    if ui.color_edit_button_rgba_unmultiplied(&mut color).changed() {
                        intents.push(UiIntent::ColorEdited { index, color });
                    }
                });

                if index + 1 < count {
                    ui.separator();
                }
            }
        });
}
