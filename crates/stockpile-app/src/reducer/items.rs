//! Items slice reducer
//!
//! Items follow the catalog fetch pattern keyed by barcode, plus CRUD
//! results and the custom fields of the item currently on screen.

use stockpile_core::types::Item;

use crate::action::ItemsAction;
use crate::state::ItemsState;

pub fn reduce(state: &mut ItemsState, action: &ItemsAction) {
    match action {
        ItemsAction::FetchItems { .. } => {
            state.show_loading_spinner = true;
        }
        ItemsAction::FetchItemsSuccess { results } => {
            state.results = results
                .iter()
                .map(|item| (item.barcode.clone(), item.clone()))
                .collect();
            state.filtered = results.clone();
            state.show_loading_spinner = false;
        }
        ItemsAction::FetchItemsFail { .. } => {
            state.show_loading_spinner = false;
        }

        ItemsAction::CreateItemSuccess { item } | ItemsAction::UpdateItemSuccess { item } => {
            upsert(state, item);
        }
        ItemsAction::DeleteItemSuccess { item } => {
            state.results.remove(&item.barcode);
            state.filtered.retain(|existing| existing.barcode != item.barcode);
        }
        // Kit commit: the batch lands in the by-barcode map; the filtered
        // view still reflects the last fetch.
        ItemsAction::CreateItemsSuccess { items } => {
            for item in items {
                state.results.insert(item.barcode.clone(), item.clone());
            }
        }

        ItemsAction::FetchItemCustomFieldsSuccess { fields }
        | ItemsAction::FetchCustomFieldsByCategorySuccess { fields } => {
            state.custom_fields = fields.clone();
        }

        // Requests ride the modal loading message and failures surface as
        // notifications; neither changes this slice.
        _ => {}
    }
}

fn upsert(state: &mut ItemsState, item: &Item) {
    state.results.insert(item.barcode.clone(), item.clone());
    if let Some(existing) = state
        .filtered
        .iter_mut()
        .find(|existing| existing.barcode == item.barcode)
    {
        *existing = item.clone();
    } else {
        state.filtered.push(item.clone());
    }
}
