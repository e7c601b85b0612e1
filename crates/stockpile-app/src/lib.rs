//! stockpile-app - State management for the Stockpile client
//!
//! This crate implements the unidirectional data flow the client runs on:
//! actions describe everything that can happen, reducers fold them into the
//! state snapshot, effects perform the API work and feed follow-up actions
//! back into the queue, and the store serializes the whole cycle. It also
//! carries the item form, the read-only selectors, and the settings loader
//! the shell boots from.

pub mod action;
pub mod config;
pub mod effects;
pub mod form;
pub mod reducer;
pub mod select;
pub mod selectors;
pub mod state;
pub mod store;

// Re-export primary types
pub use action::{
    Action, AppAction, BrandsAction, CategoriesAction, ItemsAction, KitModelsAction, LayoutAction,
    ModelsAction, RentalsAction, Screen,
};
pub use config::Settings;
pub use effects::EffectContext;
pub use form::{FieldErrors, ItemForm};
pub use select::Selection;
pub use state::{AppState, RentalPhase};
pub use store::{Store, StoreHandle};
