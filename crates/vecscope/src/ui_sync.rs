//! Applies the intents collected by the UI to the application state.

use vecscope_core::{Operator, Vec3};
use vecscope_ui::{UiButton, UiCheckbox, UiIntent, VectorDraft};

use crate::app::AppState;

/// Applies one UI intent. `draft` holds the values typed into the
/// "new vector" fields.
pub fn apply_intent(state: &mut AppState, draft: &VectorDraft, intent: UiIntent) {
    let store = &mut state.store;
    match intent {
        UiIntent::ButtonPressed(UiButton::NewVector) => {
            store.new_vector(Vec3::from_array(draft.value), Vec3::from_array(draft.color));
        }
        UiIntent::ButtonPressed(UiButton::NewDefaultVector) => {
            store.new_default_vector();
        }
        UiIntent::ButtonPressed(UiButton::Add) => store.apply_operator(Operator::Add),
        UiIntent::ButtonPressed(UiButton::Multiply) => store.apply_operator(Operator::Multiply),
        UiIntent::ButtonPressed(UiButton::Equals) => {
            store.finalize();
        }
        UiIntent::ButtonPressed(UiButton::Clear) => store.clear(),
        UiIntent::CheckboxToggled(UiCheckbox::PlaneXz, enabled) => state.set_plane_xz(enabled),
        UiIntent::CheckboxToggled(UiCheckbox::PlaneYz, enabled) => state.set_plane_yz(enabled),
        UiIntent::FloatVectorEdited { index, value } => {
            store.set_value(index, Vec3::from_array(value));
        }
        UiIntent::ColorEdited {
            index,
            color: [r, g, b, _],
        } => store.set_color(index, Vec3::new(r, g, b)),
    }
}

/// Applies intents in the order they were collected.
pub fn apply_intents(
    state: &mut AppState,
    draft: &VectorDraft,
    intents: impl IntoIterator<Item = UiIntent>,
) {
    for intent in intents {
        log::trace!("applying {intent:?}");
        apply_intent(state, draft, intent);
    }
}
