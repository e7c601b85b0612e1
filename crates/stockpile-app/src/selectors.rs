//! Read-only projections over the state snapshot
//!
//! Free functions shaped `fn(&AppState) -> T`, used directly on a snapshot
//! or handed to `StoreHandle::select` for change-driven delivery. Screens
//! depend on these instead of reaching into slices, so the slice layout can
//! move without touching every caller.

use stockpile_core::types::{
    Brand, BrandId, Category, Item, ItemCustomField, KitModel, Model, RentalKind,
};

use crate::state::{AppState, RentalPhase};

pub fn loading_message(state: &AppState) -> Option<String> {
    state.layout.loading_message.clone()
}

// ─────────────────────────────────────────────────────────────────
// Catalog pickers
// ─────────────────────────────────────────────────────────────────

pub fn filtered_brands(state: &AppState) -> Vec<Brand> {
    state.brands.filtered.clone()
}

pub fn filtered_models(state: &AppState) -> Vec<Model> {
    state.models.filtered.clone()
}

pub fn filtered_categories(state: &AppState) -> Vec<Category> {
    state.categories.filtered.clone()
}

pub fn show_add_new_brand(state: &AppState) -> bool {
    state.brands.show_add_new
}

/// Models belonging to one brand, for the item form's model picker.
/// Projects from `results` rather than `filtered` so the picker is
/// unaffected by whatever query the model screen last ran.
pub fn models_for_brand(brand_id: BrandId) -> impl Fn(&AppState) -> Vec<Model> {
    move |state| {
        let mut models: Vec<Model> = state
            .models
            .results
            .values()
            .filter(|model| model.brand_id == brand_id)
            .cloned()
            .collect();
        models.sort_by_key(|model| model.model_id);
        models
    }
}

// ─────────────────────────────────────────────────────────────────
// Items
// ─────────────────────────────────────────────────────────────────

pub fn filtered_items(state: &AppState) -> Vec<Item> {
    state.items.filtered.clone()
}

pub fn items_loading(state: &AppState) -> bool {
    state.items.show_loading_spinner
}

pub fn item_by_barcode(barcode: String) -> impl Fn(&AppState) -> Option<Item> {
    move |state| state.items.results.get(&barcode).cloned()
}

/// Custom fields for the item currently on the edit screen.
pub fn item_custom_fields(state: &AppState) -> Vec<ItemCustomField> {
    state.items.custom_fields.clone()
}

// ─────────────────────────────────────────────────────────────────
// Kits
// ─────────────────────────────────────────────────────────────────

pub fn temp_kit_models(state: &AppState) -> Vec<KitModel> {
    state.kit_models.temp_kit_models.clone()
}

// ─────────────────────────────────────────────────────────────────
// Rentals
// ─────────────────────────────────────────────────────────────────

pub fn rental_phase(state: &AppState) -> RentalPhase {
    state.rentals.phase
}

pub fn rental_kind(state: &AppState) -> Option<RentalKind> {
    state.rentals.kind
}

pub fn checklist(state: &AppState) -> Vec<Item> {
    state.rentals.checklist.clone()
}
