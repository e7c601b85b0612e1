//! Reducer module - pure state transitions (TEA pattern)
//!
//! Organized into one submodule per slice:
//! - `catalog`: the shared brand/model/category reducer
//! - `items`: item CRUD and custom fields
//! - `kit_models`: persisted kit contents and the provisional list
//! - `rentals`: the checklist state machine
//! - `layout`: the modal loading message
//!
//! Reducers never perform side effects; follow-up work happens in the
//! effects module after the store has applied the action.

pub mod catalog;
pub mod items;
pub mod kit_models;
pub mod layout;
pub mod rentals;

#[cfg(test)]
mod tests;

use crate::action::Action;
use crate::state::AppState;

/// Apply an action to the state tree.
///
/// Each sub-reducer owns exactly one slice; an action aimed at another
/// slice passes through untouched. App actions (notifications and
/// navigation) are consumed by the shell and reduce to nothing here.
pub fn reduce(state: &mut AppState, action: &Action) {
    match action {
        Action::Brands(action) => catalog::reduce_brands(&mut state.brands, action),
        Action::Models(action) => catalog::reduce_models(&mut state.models, action),
        Action::Categories(action) => catalog::reduce_categories(&mut state.categories, action),
        Action::Items(action) => items::reduce(&mut state.items, action),
        Action::KitModels(action) => kit_models::reduce(&mut state.kit_models, action),
        Action::Rentals(action) => rentals::reduce(&mut state.rentals, action),
        Action::Layout(action) => layout::reduce(&mut state.layout, action),
        Action::App(_) => {}
    }
}
