//! Effects module - async follow-up work for dispatched actions
//!
//! Organized into one submodule per concern:
//! - `catalog`: brand/model/category/kit-model fetches and creates
//! - `items`: item CRUD, the custom-fields chain, and the kit commit
//! - `rentals`: the checklist workflow (start, add, rent, return)
//!
//! [`handle`] inspects each applied action and spawns at most one task
//! onto the store's `JoinSet`. Tasks talk to the API collaborator and
//! feed follow-up actions back into the store's queue; they never touch
//! state directly. The one synchronous effect is `SHOW_MESSAGE`, which
//! forwards to the notifier so notification order matches dispatch
//! order.

pub mod catalog;
pub mod items;
pub mod rentals;

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tracing::debug;

use stockpile_api::inventory::InventoryApi;
use stockpile_core::device::Notify;
use stockpile_core::error::Error;

use crate::action::{
    Action, AppAction, BrandsAction, CategoriesAction, ItemsAction, KitModelsAction, LayoutAction,
    ModelsAction, RentalsAction,
};
use crate::state::AppState;

/// Everything an effect task needs: the API, the notifier, a read-only
/// view of the current state, and the way back into the store's queue.
pub struct EffectContext<A> {
    pub api: Arc<A>,
    pub notifier: Arc<dyn Notify>,
    state: watch::Receiver<AppState>,
    actions: mpsc::Sender<Action>,
}

impl<A> Clone for EffectContext<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            notifier: Arc::clone(&self.notifier),
            state: self.state.clone(),
            actions: self.actions.clone(),
        }
    }
}

impl<A> EffectContext<A> {
    pub fn new(
        api: Arc<A>,
        notifier: Arc<dyn Notify>,
        state: watch::Receiver<AppState>,
        actions: mpsc::Sender<Action>,
    ) -> Self {
        Self {
            api,
            notifier,
            state,
            actions,
        }
    }

    /// Snapshot of the state as of the last applied action.
    pub fn current(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Queue a follow-up action. A closed store means shutdown is in
    /// progress and the action is dropped.
    pub async fn emit(&self, action: impl Into<Action>) {
        let action = action.into();
        if self.actions.send(action).await.is_err() {
            debug!("store closed, dropping follow-up action");
        }
    }
}

/// Emit the domain FAIL action followed by the user notification.
pub(crate) async fn emit_failure<A>(
    ctx: &EffectContext<A>,
    err: Error,
    to_fail: impl FnOnce(String) -> Action,
) {
    let message = err.user_message();
    ctx.emit(to_fail(message.clone())).await;
    ctx.emit(AppAction::ShowMessage { message }).await;
}

/// Like [`emit_failure`], for flows that showed a modal loading message:
/// FAIL, then HIDE_LOADING_MESSAGE, then the notification.
pub(crate) async fn emit_failure_hiding_loading<A>(
    ctx: &EffectContext<A>,
    err: Error,
    to_fail: impl FnOnce(String) -> Action,
) {
    let message = err.user_message();
    ctx.emit(to_fail(message.clone())).await;
    ctx.emit(LayoutAction::HideLoadingMessage).await;
    ctx.emit(AppAction::ShowMessage { message }).await;
}

/// Spawn the follow-up work for an applied action, if any.
pub fn handle<A>(action: Action, ctx: &EffectContext<A>, tasks: &mut JoinSet<()>)
where
    A: InventoryApi + Send + Sync + 'static,
{
    match action {
        Action::App(AppAction::ShowMessage { message }) => {
            ctx.notifier.show(&message);
        }

        // ─────────────────────────────────────────────────────────
        // Catalog fetches and creates
        // ─────────────────────────────────────────────────────────
        Action::Brands(BrandsAction::Fetch) => {
            tasks.spawn(catalog::fetch_brands(ctx.clone()));
        }
        Action::Brands(BrandsAction::Create { name }) => {
            tasks.spawn(catalog::create_brand(ctx.clone(), name));
        }
        Action::Models(ModelsAction::Fetch) => {
            tasks.spawn(catalog::fetch_models(ctx.clone()));
        }
        Action::Models(ModelsAction::Create { brand_id, name }) => {
            tasks.spawn(catalog::create_model(ctx.clone(), brand_id, name));
        }
        Action::Categories(CategoriesAction::Fetch) => {
            tasks.spawn(catalog::fetch_categories(ctx.clone()));
        }
        Action::Categories(CategoriesAction::Create { name }) => {
            tasks.spawn(catalog::create_category(ctx.clone(), name));
        }
        Action::KitModels(KitModelsAction::Fetch { kit_id }) => {
            tasks.spawn(catalog::fetch_kit_models(ctx.clone(), kit_id));
        }

        // ─────────────────────────────────────────────────────────
        // Items
        // ─────────────────────────────────────────────────────────
        Action::Items(ItemsAction::FetchItems { filter }) => {
            tasks.spawn(items::fetch_items(ctx.clone(), filter));
        }
        Action::Items(ItemsAction::CreateItem { item, fields }) => {
            tasks.spawn(items::create_item(ctx.clone(), item, fields));
        }
        Action::Items(ItemsAction::UpdateItem { item, fields }) => {
            tasks.spawn(items::update_item(ctx.clone(), item, fields));
        }
        Action::Items(ItemsAction::UpdateItemCustomFields(chain)) => {
            tasks.spawn(items::update_item_custom_fields(ctx.clone(), chain));
        }
        Action::Items(ItemsAction::DeleteItem { barcode }) => {
            tasks.spawn(items::delete_item(ctx.clone(), barcode));
        }
        Action::Items(ItemsAction::FetchItemCustomFields { barcode }) => {
            tasks.spawn(items::fetch_item_custom_fields(ctx.clone(), barcode));
        }
        Action::Items(ItemsAction::FetchCustomFieldsByCategory { category_id }) => {
            tasks.spawn(items::fetch_custom_fields_by_category(ctx.clone(), category_id));
        }
        Action::Items(ItemsAction::CreateItems { kit_models }) => {
            tasks.spawn(items::create_items(ctx.clone(), kit_models));
        }

        // ─────────────────────────────────────────────────────────
        // Rentals
        // ─────────────────────────────────────────────────────────
        Action::Rentals(RentalsAction::StartRental { barcode }) => {
            tasks.spawn(rentals::start_rental(ctx.clone(), barcode));
        }
        Action::Rentals(RentalsAction::AddToRentals { barcode }) => {
            tasks.spawn(rentals::add_to_rentals(ctx.clone(), barcode));
        }
        Action::Rentals(RentalsAction::Rent { details }) => {
            tasks.spawn(rentals::rent_items(ctx.clone(), details));
        }
        Action::Rentals(RentalsAction::Return { returned_date }) => {
            tasks.spawn(rentals::return_items(ctx.clone(), returned_date));
        }

        _ => {}
    }
}
