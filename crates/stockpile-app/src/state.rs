//! Application state snapshot
//!
//! One slice per entity domain, composed into [`AppState`]. Reducers
//! produce new snapshots; the store publishes them over a watch channel,
//! so everything here is cheap to clone and comparable for change
//! detection.

use std::collections::HashMap;

use stockpile_core::types::{
    Brand, CatalogEntity, Category, Item, ItemCustomField, KitId, KitModel, Model, RentalKind,
};

// ─────────────────────────────────────────────────────────────────
// Catalog slices (brands, models, categories)
// ─────────────────────────────────────────────────────────────────

/// Shared shape of the three catalog slices: a by-id map of everything
/// fetched so far plus the filtered view currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogState<T: CatalogEntity> {
    /// All fetched entities, keyed by id.
    pub results: HashMap<T::Id, T>,
    /// The entities matching the current filter, in display order.
    pub filtered: Vec<T>,
    /// Whether the picker should offer an "add new" entry.
    pub show_add_new: bool,
    pub show_loading_spinner: bool,
}

impl<T: CatalogEntity> Default for CatalogState<T> {
    fn default() -> Self {
        Self {
            results: HashMap::new(),
            filtered: Vec::new(),
            show_add_new: false,
            show_loading_spinner: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Items
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemsState {
    /// All fetched items, keyed by barcode.
    pub results: HashMap<String, Item>,
    /// The last fetch result, in server order.
    pub filtered: Vec<Item>,
    /// Custom fields for the item currently being viewed or edited.
    pub custom_fields: Vec<ItemCustomField>,
    pub show_loading_spinner: bool,
}

// ─────────────────────────────────────────────────────────────────
// Kit models
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KitModelsState {
    /// Persisted kit contents, keyed by kit id.
    pub results: HashMap<KitId, Vec<KitModel>>,
    /// The provisional list edited before a kit is committed.
    pub temp_kit_models: Vec<KitModel>,
    pub show_loading_spinner: bool,
}

// ─────────────────────────────────────────────────────────────────
// Rentals
// ─────────────────────────────────────────────────────────────────

/// Where the rental checklist workflow currently stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RentalPhase {
    /// No rental in progress.
    #[default]
    Idle,
    /// Scanning items into the checklist.
    Collecting,
    /// Checklist confirmed, collecting details before submission.
    Reviewing,
    /// Request in flight.
    Submitting,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RentalsState {
    pub phase: RentalPhase,
    /// Rent or return. Fixed by the first scanned item's availability.
    pub kind: Option<RentalKind>,
    pub checklist: Vec<Item>,
}

impl RentalsState {
    /// Whether an item is already on the checklist.
    pub fn contains(&self, barcode: &str) -> bool {
        self.checklist.iter().any(|item| item.barcode == barcode)
    }
}

// ─────────────────────────────────────────────────────────────────
// Layout
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutState {
    /// Modal loading message, shown while an API round-trip is pending.
    pub loading_message: Option<String>,
}

// ─────────────────────────────────────────────────────────────────
// Application state
// ─────────────────────────────────────────────────────────────────

/// The complete state snapshot published after every reduced action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub brands: CatalogState<Brand>,
    pub models: CatalogState<Model>,
    pub categories: CatalogState<Category>,
    pub items: ItemsState,
    pub kit_models: KitModelsState,
    pub rentals: RentalsState,
    pub layout: LayoutState,
}
