//! Catalog slice reducers (brands, models, categories)
//!
//! The three catalog slices share one set of transitions, written
//! against [`CatalogEntity`]. The per-domain functions only unpack
//! their action enum.

use stockpile_core::types::{Brand, CatalogEntity, Category, Model};

use crate::action::{BrandsAction, CategoriesAction, ModelsAction};
use crate::state::CatalogState;

pub fn reduce_brands(state: &mut CatalogState<Brand>, action: &BrandsAction) {
    match action {
        BrandsAction::Fetch => fetch(state),
        BrandsAction::FetchSuccess { results } => fetch_success(state, results),
        BrandsAction::FetchFail { .. } => fetch_fail(state),
        BrandsAction::Filter { query } => filter(state, query),
        BrandsAction::CreateSuccess { brand } => create_success(state, brand),
        BrandsAction::Create { .. } | BrandsAction::CreateFail { .. } => {}
    }
}

pub fn reduce_models(state: &mut CatalogState<Model>, action: &ModelsAction) {
    match action {
        ModelsAction::Fetch => fetch(state),
        ModelsAction::FetchSuccess { results } => fetch_success(state, results),
        ModelsAction::FetchFail { .. } => fetch_fail(state),
        ModelsAction::Filter { query } => filter(state, query),
        ModelsAction::CreateSuccess { model } => create_success(state, model),
        ModelsAction::Create { .. } | ModelsAction::CreateFail { .. } => {}
    }
}

pub fn reduce_categories(state: &mut CatalogState<Category>, action: &CategoriesAction) {
    match action {
        CategoriesAction::Fetch => fetch(state),
        CategoriesAction::FetchSuccess { results } => fetch_success(state, results),
        CategoriesAction::FetchFail { .. } => fetch_fail(state),
        CategoriesAction::Filter { query } => filter(state, query),
        CategoriesAction::CreateSuccess { category } => create_success(state, category),
        CategoriesAction::Create { .. } | CategoriesAction::CreateFail { .. } => {}
    }
}

fn fetch<T: CatalogEntity>(state: &mut CatalogState<T>) {
    state.show_loading_spinner = true;
}

/// Replace the slice with the payload. `filtered` keeps the server's
/// order; `results` is re-keyed by id.
fn fetch_success<T: CatalogEntity>(state: &mut CatalogState<T>, results: &[T]) {
    state.results = results
        .iter()
        .map(|entity| (entity.id(), entity.clone()))
        .collect();
    state.filtered = results.to_vec();
    state.show_add_new = false;
    state.show_loading_spinner = false;
}

/// Stop the spinner but keep stale results on screen.
fn fetch_fail<T: CatalogEntity>(state: &mut CatalogState<T>) {
    state.show_loading_spinner = false;
}

/// Recompute the filtered view from everything fetched so far, in
/// ascending id order. An empty query or an empty match list makes the
/// picker offer its "add new" entry.
fn filter<T: CatalogEntity>(state: &mut CatalogState<T>, query: &str) {
    let needle = query.to_lowercase();
    let mut entries: Vec<T> = state.results.values().cloned().collect();
    entries.sort_by_key(|entity| entity.id());

    state.filtered = entries
        .into_iter()
        .filter(|entity| entity.name().to_lowercase().contains(&needle))
        .collect();
    state.show_add_new = query.is_empty() || state.filtered.is_empty();
}

/// A freshly created entity becomes visible immediately.
fn create_success<T: CatalogEntity>(state: &mut CatalogState<T>, entity: &T) {
    state.results.insert(entity.id(), entity.clone());
    state.filtered.push(entity.clone());
}
