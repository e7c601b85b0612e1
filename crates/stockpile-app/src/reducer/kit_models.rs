//! Kit models slice reducer
//!
//! Persisted kit contents live in `results`; the provisional list the
//! user edits before committing a kit lives in `temp_kit_models`. Temp
//! entries have no server id yet, so the model id serves as a
//! best-effort identity key.

use crate::action::KitModelsAction;
use crate::state::KitModelsState;

pub fn reduce(state: &mut KitModelsState, action: &KitModelsAction) {
    match action {
        KitModelsAction::Fetch { .. } => {
            state.show_loading_spinner = true;
        }
        // An empty payload leaves `results` alone but still mirrors into
        // the temp list, so editing a kit starts from what the server has.
        KitModelsAction::FetchSuccess { kit_id, results } => {
            if !results.is_empty() {
                state.results.insert(*kit_id, results.clone());
            }
            state.temp_kit_models = results.clone();
            state.show_loading_spinner = false;
        }
        KitModelsAction::FetchFail { .. } => {
            state.show_loading_spinner = false;
        }

        KitModelsAction::CreateTemp { kit_model } => {
            state.temp_kit_models.push(kit_model.clone());
        }
        KitModelsAction::UpdateTemp { kit_model } => {
            for existing in &mut state.temp_kit_models {
                if existing.model_id == kit_model.model_id {
                    *existing = kit_model.clone();
                }
            }
        }
        KitModelsAction::DeleteTemp { model_id } => {
            state
                .temp_kit_models
                .retain(|kit_model| kit_model.model_id != *model_id);
        }
        KitModelsAction::ResetTemp => {
            state.temp_kit_models.clear();
        }
    }
}
