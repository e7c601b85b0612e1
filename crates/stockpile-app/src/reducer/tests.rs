//! Tests for the reducer module

use super::*;
use crate::action::{
    Action, BrandsAction, CategoriesAction, ItemsAction, KitModelsAction, LayoutAction,
    ModelsAction, RentalsAction,
};
use crate::state::{AppState, RentalPhase};

use chrono::NaiveDate;
use stockpile_api::test_utils::{
    test_brand, test_category, test_item, test_item_custom_field, test_item_unavailable,
    test_kit_model, test_model,
};
use stockpile_core::types::{RentalDetails, RentalKind};

fn apply(state: &mut AppState, action: impl Into<Action>) {
    reduce(state, &action.into());
}

fn fetched_brands(state: &mut AppState) {
    apply(
        state,
        BrandsAction::FetchSuccess {
            results: vec![test_brand(1, "Sony"), test_brand(2, "Canon")],
        },
    );
}

// ─────────────────────────────────────────────────────────────────
// Cross-slice behavior
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_app_actions_do_not_change_state() {
    let mut state = AppState::default();
    fetched_brands(&mut state);
    let before = state.clone();

    apply(&mut state, crate::action::AppAction::PopNav);
    apply(
        &mut state,
        crate::action::AppAction::ShowMessage {
            message: "hello".to_string(),
        },
    );

    assert_eq!(state, before);
}

#[test]
fn test_action_for_another_slice_is_identity() {
    let mut state = AppState::default();
    fetched_brands(&mut state);
    let brands_before = state.brands.clone();

    apply(&mut state, ItemsAction::FetchItems { filter: Default::default() });
    apply(&mut state, RentalsAction::Review);

    assert_eq!(state.brands, brands_before);
}

// ─────────────────────────────────────────────────────────────────
// Catalog slices
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_fetch_sets_loading_spinner() {
    let mut state = AppState::default();

    apply(&mut state, BrandsAction::Fetch);

    assert!(state.brands.show_loading_spinner);
}

#[test]
fn test_fetch_success_keys_results_by_id_and_keeps_payload_order() {
    let mut state = AppState::default();
    apply(&mut state, BrandsAction::Fetch);

    fetched_brands(&mut state);

    assert_eq!(state.brands.results.len(), 2);
    assert_eq!(state.brands.results[&1].name, "Sony");
    assert_eq!(state.brands.results[&2].name, "Canon");
    let names: Vec<&str> = state.brands.filtered.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Sony", "Canon"]);
    assert!(!state.brands.show_loading_spinner);
    assert!(!state.brands.show_add_new);
}

#[test]
fn test_fetch_fail_clears_spinner_but_keeps_stale_results() {
    let mut state = AppState::default();
    fetched_brands(&mut state);
    apply(&mut state, BrandsAction::Fetch);

    apply(
        &mut state,
        BrandsAction::FetchFail {
            error: "server error".to_string(),
        },
    );

    assert!(!state.brands.show_loading_spinner);
    assert_eq!(state.brands.results.len(), 2);
    assert_eq!(state.brands.filtered.len(), 2);
}

#[test]
fn test_filter_is_case_insensitive_substring_match() {
    let mut state = AppState::default();
    fetched_brands(&mut state);

    apply(
        &mut state,
        BrandsAction::Filter {
            query: "son".to_string(),
        },
    );

    let names: Vec<&str> = state.brands.filtered.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Sony"]);
    assert!(!state.brands.show_add_new);
}

#[test]
fn test_filter_empty_query_shows_everything_in_id_order_and_offers_add_new() {
    let mut state = AppState::default();
    // Payload deliberately out of id order.
    apply(
        &mut state,
        BrandsAction::FetchSuccess {
            results: vec![test_brand(2, "Canon"), test_brand(1, "Sony")],
        },
    );

    apply(
        &mut state,
        BrandsAction::Filter {
            query: String::new(),
        },
    );

    let names: Vec<&str> = state.brands.filtered.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Sony", "Canon"]);
    assert!(state.brands.show_add_new);
}

#[test]
fn test_filter_without_matches_offers_add_new() {
    let mut state = AppState::default();
    fetched_brands(&mut state);

    apply(
        &mut state,
        BrandsAction::Filter {
            query: "Leica".to_string(),
        },
    );

    assert!(state.brands.filtered.is_empty());
    assert!(state.brands.show_add_new);
}

#[test]
fn test_create_success_inserts_and_appends() {
    let mut state = AppState::default();
    fetched_brands(&mut state);

    apply(
        &mut state,
        BrandsAction::CreateSuccess {
            brand: test_brand(3, "Nikon"),
        },
    );

    assert_eq!(state.brands.results.len(), 3);
    assert_eq!(state.brands.filtered.last().unwrap().name, "Nikon");
}

#[test]
fn test_create_request_and_fail_leave_slice_untouched() {
    let mut state = AppState::default();
    fetched_brands(&mut state);
    let before = state.brands.clone();

    apply(
        &mut state,
        BrandsAction::Create {
            name: "Nikon".to_string(),
        },
    );
    apply(
        &mut state,
        BrandsAction::CreateFail {
            error: "duplicate".to_string(),
        },
    );

    assert_eq!(state.brands, before);
}

#[test]
fn test_models_and_categories_share_the_catalog_machinery() {
    let mut state = AppState::default();

    apply(
        &mut state,
        ModelsAction::FetchSuccess {
            results: vec![test_model(7, 1, "A7"), test_model(8, 1, "A9")],
        },
    );
    apply(
        &mut state,
        ModelsAction::Filter {
            query: "a9".to_string(),
        },
    );
    assert_eq!(state.models.filtered.len(), 1);
    assert_eq!(state.models.filtered[0].name, "A9");

    apply(
        &mut state,
        CategoriesAction::CreateSuccess {
            category: test_category(3, "Cameras"),
        },
    );
    assert_eq!(state.categories.results[&3].name, "Cameras");
}

// ─────────────────────────────────────────────────────────────────
// Items slice
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_items_fetch_success_keys_by_barcode() {
    let mut state = AppState::default();
    apply(&mut state, ItemsAction::FetchItems { filter: Default::default() });
    assert!(state.items.show_loading_spinner);

    apply(
        &mut state,
        ItemsAction::FetchItemsSuccess {
            results: vec![test_item("9000001"), test_item("9000002")],
        },
    );

    assert_eq!(state.items.results.len(), 2);
    assert!(state.items.results.contains_key("9000001"));
    assert_eq!(state.items.filtered.len(), 2);
    assert!(!state.items.show_loading_spinner);
}

#[test]
fn test_items_fetch_fail_keeps_stale_results() {
    let mut state = AppState::default();
    apply(
        &mut state,
        ItemsAction::FetchItemsSuccess {
            results: vec![test_item("9000001")],
        },
    );

    apply(
        &mut state,
        ItemsAction::FetchItemsFail {
            error: "timeout".to_string(),
        },
    );

    assert_eq!(state.items.results.len(), 1);
    assert!(!state.items.show_loading_spinner);
}

#[test]
fn test_update_item_success_replaces_in_place() {
    let mut state = AppState::default();
    apply(
        &mut state,
        ItemsAction::FetchItemsSuccess {
            results: vec![test_item("9000001"), test_item("9000002")],
        },
    );

    let edited = test_item_unavailable("9000001");
    apply(&mut state, ItemsAction::UpdateItemSuccess { item: edited });

    assert!(!state.items.results["9000001"].available);
    assert_eq!(state.items.filtered.len(), 2);
    assert!(!state.items.filtered[0].available);
}

#[test]
fn test_create_item_success_appends() {
    let mut state = AppState::default();

    apply(
        &mut state,
        ItemsAction::CreateItemSuccess {
            item: test_item("9000009"),
        },
    );

    assert!(state.items.results.contains_key("9000009"));
    assert_eq!(state.items.filtered.len(), 1);
}

#[test]
fn test_delete_item_success_removes_everywhere() {
    let mut state = AppState::default();
    apply(
        &mut state,
        ItemsAction::FetchItemsSuccess {
            results: vec![test_item("9000001"), test_item("9000002")],
        },
    );

    apply(
        &mut state,
        ItemsAction::DeleteItemSuccess {
            item: test_item("9000001"),
        },
    );

    assert!(!state.items.results.contains_key("9000001"));
    assert_eq!(state.items.filtered.len(), 1);
    assert_eq!(state.items.filtered[0].barcode, "9000002");
}

#[test]
fn test_batch_create_merges_into_results_only() {
    let mut state = AppState::default();
    apply(
        &mut state,
        ItemsAction::FetchItemsSuccess {
            results: vec![test_item("9000001")],
        },
    );

    apply(
        &mut state,
        ItemsAction::CreateItemsSuccess {
            items: vec![test_item("9000002"), test_item("9000003")],
        },
    );

    assert_eq!(state.items.results.len(), 3);
    assert_eq!(state.items.filtered.len(), 1);
}

#[test]
fn test_custom_fields_successes_replace_current_fields() {
    let mut state = AppState::default();

    apply(
        &mut state,
        ItemsAction::FetchItemCustomFieldsSuccess {
            fields: vec![test_item_custom_field(4, "Color", Some("Sunburst"))],
        },
    );
    assert_eq!(state.items.custom_fields.len(), 1);
    assert_eq!(state.items.custom_fields[0].value.as_deref(), Some("Sunburst"));

    // Switching category loads value-less definitions over the old values.
    apply(
        &mut state,
        ItemsAction::FetchCustomFieldsByCategorySuccess {
            fields: vec![
                test_item_custom_field(5, "Sensor", None),
                test_item_custom_field(6, "Mount", None),
            ],
        },
    );
    assert_eq!(state.items.custom_fields.len(), 2);
    assert!(state.items.custom_fields.iter().all(|f| f.value.is_none()));
}

// ─────────────────────────────────────────────────────────────────
// Kit models slice
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_kit_fetch_success_stores_by_kit_and_mirrors_temp() {
    let mut state = AppState::default();

    apply(
        &mut state,
        KitModelsAction::FetchSuccess {
            kit_id: 5,
            results: vec![test_kit_model(7, 2)],
        },
    );

    assert_eq!(state.kit_models.results[&5].len(), 1);
    assert_eq!(state.kit_models.temp_kit_models.len(), 1);
    assert!(!state.kit_models.show_loading_spinner);
}

#[test]
fn test_kit_fetch_success_with_empty_payload_only_clears_temp() {
    let mut state = AppState::default();
    apply(
        &mut state,
        KitModelsAction::FetchSuccess {
            kit_id: 5,
            results: vec![test_kit_model(7, 2)],
        },
    );

    apply(
        &mut state,
        KitModelsAction::FetchSuccess {
            kit_id: 6,
            results: vec![],
        },
    );

    assert!(state.kit_models.results.contains_key(&5));
    assert!(!state.kit_models.results.contains_key(&6));
    assert!(state.kit_models.temp_kit_models.is_empty());
}

#[test]
fn test_temp_kit_model_lifecycle() {
    let mut state = AppState::default();

    apply(
        &mut state,
        KitModelsAction::CreateTemp {
            kit_model: test_kit_model(7, 2),
        },
    );
    apply(
        &mut state,
        KitModelsAction::CreateTemp {
            kit_model: test_kit_model(8, 1),
        },
    );
    assert_eq!(state.kit_models.temp_kit_models.len(), 2);

    apply(
        &mut state,
        KitModelsAction::UpdateTemp {
            kit_model: test_kit_model(7, 5),
        },
    );
    assert_eq!(state.kit_models.temp_kit_models[0].quantity, 5);

    apply(&mut state, KitModelsAction::DeleteTemp { model_id: 8 });
    assert_eq!(state.kit_models.temp_kit_models.len(), 1);

    apply(&mut state, KitModelsAction::ResetTemp);
    assert!(state.kit_models.temp_kit_models.is_empty());
}

// ─────────────────────────────────────────────────────────────────
// Rentals slice
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_start_rental_success_seeds_checklist_and_fixes_kind() {
    let mut state = AppState::default();

    apply(
        &mut state,
        RentalsAction::StartRentalSuccess {
            item: test_item("9000001"),
        },
    );

    assert_eq!(state.rentals.phase, RentalPhase::Collecting);
    assert_eq!(state.rentals.kind, Some(RentalKind::Rent));
    assert_eq!(state.rentals.checklist.len(), 1);
}

#[test]
fn test_start_rental_with_unavailable_item_starts_a_return() {
    let mut state = AppState::default();

    apply(
        &mut state,
        RentalsAction::StartRentalSuccess {
            item: test_item_unavailable("9000001"),
        },
    );

    assert_eq!(state.rentals.kind, Some(RentalKind::Return));
}

#[test]
fn test_add_to_rentals_success_appends_without_duplicates() {
    let mut state = AppState::default();
    apply(
        &mut state,
        RentalsAction::StartRentalSuccess {
            item: test_item("9000001"),
        },
    );

    apply(
        &mut state,
        RentalsAction::AddToRentalsSuccess {
            item: test_item("9000002"),
        },
    );
    apply(
        &mut state,
        RentalsAction::AddToRentalsSuccess {
            item: test_item("9000002"),
        },
    );

    assert_eq!(state.rentals.checklist.len(), 2);
}

#[test]
fn test_remove_from_rentals_deletes_by_barcode() {
    let mut state = AppState::default();
    apply(
        &mut state,
        RentalsAction::StartRentalSuccess {
            item: test_item("9000001"),
        },
    );
    apply(
        &mut state,
        RentalsAction::AddToRentalsSuccess {
            item: test_item("9000002"),
        },
    );

    apply(
        &mut state,
        RentalsAction::RemoveFromRentals {
            barcode: "9000001".to_string(),
        },
    );

    assert_eq!(state.rentals.checklist.len(), 1);
    assert_eq!(state.rentals.checklist[0].barcode, "9000002");
}

#[test]
fn test_rental_phases_through_a_successful_rent() {
    let mut state = AppState::default();
    apply(
        &mut state,
        RentalsAction::StartRentalSuccess {
            item: test_item("9000001"),
        },
    );

    apply(&mut state, RentalsAction::Review);
    assert_eq!(state.rentals.phase, RentalPhase::Reviewing);

    apply(
        &mut state,
        RentalsAction::Rent {
            details: RentalDetails {
                rented_date: NaiveDate::from_ymd_opt(2017, 3, 1).unwrap(),
                expected_return_date: None,
            },
        },
    );
    assert_eq!(state.rentals.phase, RentalPhase::Submitting);

    apply(&mut state, RentalsAction::RentSuccess);
    assert_eq!(state.rentals.phase, RentalPhase::Idle);
    assert!(state.rentals.checklist.is_empty());
    assert!(state.rentals.kind.is_none());
}

#[test]
fn test_failed_submission_falls_back_to_reviewing() {
    let mut state = AppState::default();
    apply(
        &mut state,
        RentalsAction::StartRentalSuccess {
            item: test_item_unavailable("9000001"),
        },
    );
    apply(&mut state, RentalsAction::Review);
    apply(
        &mut state,
        RentalsAction::Return {
            returned_date: NaiveDate::from_ymd_opt(2017, 3, 8).unwrap(),
        },
    );

    apply(
        &mut state,
        RentalsAction::ReturnFail {
            error: "server error".to_string(),
        },
    );

    assert_eq!(state.rentals.phase, RentalPhase::Reviewing);
    assert_eq!(state.rentals.checklist.len(), 1);
}

// ─────────────────────────────────────────────────────────────────
// Layout slice
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_loading_message_shown_and_hidden() {
    let mut state = AppState::default();

    apply(
        &mut state,
        LayoutAction::ShowLoadingMessage {
            message: "Creating item...".to_string(),
        },
    );
    assert_eq!(state.layout.loading_message.as_deref(), Some("Creating item..."));

    apply(&mut state, LayoutAction::HideLoadingMessage);
    assert!(state.layout.loading_message.is_none());
}
