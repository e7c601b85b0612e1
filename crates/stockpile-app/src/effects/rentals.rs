//! Rental effects: starting a checklist, adding items, and submitting
//!
//! The add validation runs here rather than on the screen so every
//! entry point (scanner, manual entry) gets the same rules. Rent and
//! return read the checklist from the state snapshot the store
//! published when the submit action was applied.

use chrono::NaiveDate;
use futures_util::future::try_join_all;

use stockpile_api::inventory::InventoryApi;
use stockpile_core::messages;
use stockpile_core::types::{RentalDetails, RentalKind};

use super::{emit_failure_hiding_loading, EffectContext};
use crate::action::{Action, AppAction, LayoutAction, RentalsAction, Screen};

pub async fn start_rental<A: InventoryApi>(ctx: EffectContext<A>, barcode: String) {
    match ctx.api.item(&barcode).await {
        Ok(item) => {
            let kind = if item.available {
                RentalKind::Rent
            } else {
                RentalKind::Return
            };
            ctx.emit(RentalsAction::StartRentalSuccess { item }).await;
            ctx.emit(LayoutAction::HideLoadingMessage).await;
            ctx.emit(AppAction::PushPage {
                screen: Screen::Rental { kind },
            })
            .await;
        }
        Err(err) => {
            emit_failure_hiding_loading(&ctx, err, |error| {
                Action::Rentals(RentalsAction::StartRentalFail { error })
            })
            .await;
        }
    }
}

/// Validation order: wrong availability for the checklist's kind first,
/// then duplicates. All rejections leave the checklist unchanged and
/// surface as notifications.
pub async fn add_to_rentals<A: InventoryApi>(ctx: EffectContext<A>, barcode: String) {
    match ctx.api.item(&barcode).await {
        Ok(item) => {
            let rentals = ctx.current().rentals;
            let rejection = match rentals.kind {
                Some(RentalKind::Rent) if !item.available => Some(messages::ITEM_ALREADY_RENTED),
                Some(RentalKind::Return) if item.available => Some(messages::ITEM_NOT_RENTED),
                _ if rentals.contains(&item.barcode) => Some(messages::ITEM_ALREADY_ADDED),
                _ => None,
            };

            match rejection {
                None => {
                    ctx.emit(RentalsAction::AddToRentalsSuccess { item }).await;
                    ctx.emit(LayoutAction::HideLoadingMessage).await;
                }
                Some(message) => {
                    ctx.emit(RentalsAction::AddToRentalsFail {
                        message: message.to_string(),
                    })
                    .await;
                    ctx.emit(LayoutAction::HideLoadingMessage).await;
                    ctx.emit(AppAction::ShowMessage {
                        message: message.to_string(),
                    })
                    .await;
                }
            }
        }
        Err(err) => {
            let message = err.user_message();
            ctx.emit(RentalsAction::AddToRentalsFail {
                message: message.clone(),
            })
            .await;
            ctx.emit(LayoutAction::HideLoadingMessage).await;
            ctx.emit(AppAction::ShowMessage { message }).await;
        }
    }
}

/// One rental per checklist item, all from the same details, joined
/// all-or-nothing.
pub async fn rent_items<A: InventoryApi>(ctx: EffectContext<A>, details: RentalDetails) {
    let checklist = ctx.current().rentals.checklist;
    let result = try_join_all(
        checklist
            .iter()
            .map(|item| ctx.api.rent(&item.barcode, &details)),
    )
    .await;

    match result {
        Ok(_) => {
            ctx.emit(RentalsAction::RentSuccess).await;
            ctx.emit(LayoutAction::HideLoadingMessage).await;
            ctx.emit(AppAction::ShowMessage {
                message: messages::ITEMS_RENTED.to_string(),
            })
            .await;
            ctx.emit(AppAction::PopNavToRoot).await;
        }
        Err(err) => {
            emit_failure_hiding_loading(&ctx, err, |error| {
                Action::Rentals(RentalsAction::RentFail { error })
            })
            .await;
        }
    }
}

/// Per checklist item: look up the open rental, then close it with the
/// given date. The two steps are sequential per item; items are joined
/// all-or-nothing.
pub async fn return_items<A: InventoryApi>(ctx: EffectContext<A>, returned_date: NaiveDate) {
    let checklist = ctx.current().rentals.checklist;
    let result = try_join_all(checklist.iter().map(|item| {
        let api = &ctx.api;
        async move {
            let rental = api.active_rental(&item.barcode).await?;
            api.return_rental(rental.rental_id, returned_date).await
        }
    }))
    .await;

    match result {
        Ok(_) => {
            ctx.emit(RentalsAction::ReturnSuccess).await;
            ctx.emit(LayoutAction::HideLoadingMessage).await;
            ctx.emit(AppAction::ShowMessage {
                message: messages::ITEMS_RETURNED.to_string(),
            })
            .await;
            ctx.emit(AppAction::PopNav).await;
        }
        Err(err) => {
            emit_failure_hiding_loading(&ctx, err, |error| {
                Action::Rentals(RentalsAction::ReturnFail { error })
            })
            .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::testing::{drain, harness, labels};
    use crate::state::{AppState, RentalPhase, RentalsState};
    use stockpile_api::test_utils::{
        test_item, test_item_unavailable, test_rental, StubInventoryApi,
    };

    fn collecting(kind: RentalKind, checklist: Vec<stockpile_core::types::Item>) -> AppState {
        AppState {
            rentals: RentalsState {
                phase: RentalPhase::Collecting,
                kind: Some(kind),
                checklist,
            },
            ..AppState::default()
        }
    }

    #[tokio::test]
    async fn test_start_rental_pushes_rent_page_for_available_item() {
        let api = StubInventoryApi::new();
        api.add_item(test_item("9000001"));
        let (ctx, mut rx) = harness(api, AppState::default());

        start_rental(ctx, "9000001".to_string()).await;

        let actions = drain(&mut rx);
        assert_eq!(
            labels(&actions),
            vec![
                "rentals.start_success",
                "layout.hide_loading_message",
                "app.push_page"
            ]
        );
        match &actions[2] {
            Action::App(AppAction::PushPage { screen }) => {
                assert_eq!(
                    *screen,
                    Screen::Rental {
                        kind: RentalKind::Rent
                    }
                );
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_start_rental_pushes_return_page_for_rented_item() {
        let api = StubInventoryApi::new();
        api.add_item(test_item_unavailable("9000001"));
        let (ctx, mut rx) = harness(api, AppState::default());

        start_rental(ctx, "9000001".to_string()).await;

        let actions = drain(&mut rx);
        match &actions[2] {
            Action::App(AppAction::PushPage { screen }) => {
                assert_eq!(
                    *screen,
                    Screen::Rental {
                        kind: RentalKind::Return
                    }
                );
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_start_rental_unknown_barcode_notifies() {
        let api = StubInventoryApi::new();
        let (ctx, mut rx) = harness(api, AppState::default());

        start_rental(ctx, "404".to_string()).await;

        let actions = drain(&mut rx);
        assert_eq!(
            labels(&actions),
            vec![
                "rentals.start_fail",
                "layout.hide_loading_message",
                "app.show_message"
            ]
        );
    }

    #[tokio::test]
    async fn test_add_rejects_rented_item_under_rent() {
        let api = StubInventoryApi::new();
        api.add_item(test_item_unavailable("9000002"));
        let state = collecting(RentalKind::Rent, vec![test_item("9000001")]);
        let (ctx, mut rx) = harness(api, state);

        add_to_rentals(ctx, "9000002".to_string()).await;

        let actions = drain(&mut rx);
        assert_eq!(
            labels(&actions),
            vec![
                "rentals.add_fail",
                "layout.hide_loading_message",
                "app.show_message"
            ]
        );
        match &actions[0] {
            Action::Rentals(RentalsAction::AddToRentalsFail { message }) => {
                assert_eq!(message, messages::ITEM_ALREADY_RENTED);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_rejects_available_item_under_return() {
        let api = StubInventoryApi::new();
        api.add_item(test_item("9000002"));
        let state = collecting(RentalKind::Return, vec![test_item_unavailable("9000001")]);
        let (ctx, mut rx) = harness(api, state);

        add_to_rentals(ctx, "9000002".to_string()).await;

        let actions = drain(&mut rx);
        match &actions[0] {
            Action::Rentals(RentalsAction::AddToRentalsFail { message }) => {
                assert_eq!(message, messages::ITEM_NOT_RENTED);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_rejects_duplicate_barcode() {
        let api = StubInventoryApi::new();
        api.add_item(test_item("9000001"));
        let state = collecting(RentalKind::Rent, vec![test_item("9000001")]);
        let (ctx, mut rx) = harness(api, state);

        add_to_rentals(ctx, "9000001".to_string()).await;

        let actions = drain(&mut rx);
        match &actions[0] {
            Action::Rentals(RentalsAction::AddToRentalsFail { message }) => {
                assert_eq!(message, messages::ITEM_ALREADY_ADDED);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_accepts_valid_item() {
        let api = StubInventoryApi::new();
        api.add_item(test_item("9000002"));
        let state = collecting(RentalKind::Rent, vec![test_item("9000001")]);
        let (ctx, mut rx) = harness(api, state);

        add_to_rentals(ctx, "9000002".to_string()).await;

        let actions = drain(&mut rx);
        assert_eq!(
            labels(&actions),
            vec!["rentals.add_success", "layout.hide_loading_message"]
        );
    }

    #[tokio::test]
    async fn test_rent_creates_one_rental_per_checklist_item() {
        let api = StubInventoryApi::new();
        api.add_item(test_item("9000001"));
        api.add_item(test_item("9000002"));
        let state = collecting(
            RentalKind::Rent,
            vec![test_item("9000001"), test_item("9000002")],
        );
        let (ctx, mut rx) = harness(api, state);
        let details = RentalDetails {
            rented_date: NaiveDate::from_ymd_opt(2017, 3, 1).unwrap(),
            expected_return_date: None,
        };

        rent_items(ctx.clone(), details).await;

        assert!(ctx.api.active_rental_for("9000001").is_some());
        assert!(ctx.api.active_rental_for("9000002").is_some());
        let actions = drain(&mut rx);
        assert_eq!(
            labels(&actions),
            vec![
                "rentals.rent_success",
                "layout.hide_loading_message",
                "app.show_message",
                "app.pop_nav_to_root"
            ]
        );
    }

    #[tokio::test]
    async fn test_rent_failure_fails_the_batch_without_rollback() {
        let api = StubInventoryApi::new();
        api.add_item(test_item("9000001"));
        // Already rented elsewhere, so the second request must fail.
        api.add_item(test_item_unavailable("9000002"));
        api.add_active_rental(test_rental(900, "9000002", "2017-02-01"));
        let state = collecting(
            RentalKind::Rent,
            vec![test_item("9000001"), test_item("9000002")],
        );
        let (ctx, mut rx) = harness(api, state);
        let details = RentalDetails {
            rented_date: NaiveDate::from_ymd_opt(2017, 3, 1).unwrap(),
            expected_return_date: None,
        };

        rent_items(ctx, details).await;

        let actions = drain(&mut rx);
        assert_eq!(
            labels(&actions),
            vec![
                "rentals.rent_fail",
                "layout.hide_loading_message",
                "app.show_message"
            ]
        );
    }

    #[tokio::test]
    async fn test_return_closes_the_active_rental_of_each_item() {
        let api = StubInventoryApi::new();
        api.add_item(test_item_unavailable("9000001"));
        api.add_item(test_item_unavailable("9000002"));
        api.add_active_rental(test_rental(901, "9000001", "2017-02-01"));
        api.add_active_rental(test_rental(902, "9000002", "2017-02-01"));
        let state = collecting(
            RentalKind::Return,
            vec![
                test_item_unavailable("9000001"),
                test_item_unavailable("9000002"),
            ],
        );
        let (ctx, mut rx) = harness(api, state);

        return_items(ctx.clone(), NaiveDate::from_ymd_opt(2017, 3, 8).unwrap()).await;

        assert_eq!(ctx.api.closed_rentals().len(), 2);
        assert!(ctx.api.active_rental_for("9000001").is_none());
        let actions = drain(&mut rx);
        assert_eq!(
            labels(&actions),
            vec![
                "rentals.return_success",
                "layout.hide_loading_message",
                "app.show_message",
                "app.pop_nav"
            ]
        );
    }

    #[tokio::test]
    async fn test_return_without_active_rental_fails() {
        let api = StubInventoryApi::new();
        api.add_item(test_item_unavailable("9000001"));
        let state = collecting(RentalKind::Return, vec![test_item_unavailable("9000001")]);
        let (ctx, mut rx) = harness(api, state);

        return_items(ctx, NaiveDate::from_ymd_opt(2017, 3, 8).unwrap()).await;

        let actions = drain(&mut rx);
        assert_eq!(labels(&actions)[0], "rentals.return_fail");
    }
}
