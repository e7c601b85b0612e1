//! Item effects: CRUD, the custom-fields chain, and the kit commit
//!
//! Create and update both funnel into the UPDATE_ITEM_CUSTOM_FIELDS
//! chain: the item round-trip first, then one request per custom field
//! joined all-or-nothing, then the terminal success/notification/
//! navigation sequence. A failed join fails the whole user action with
//! no rollback of the field writes that did land.

use futures_util::future::try_join_all;

use stockpile_api::inventory::InventoryApi;
use stockpile_core::messages;
use stockpile_core::types::{CategoryId, Item, ItemCustomField, ItemFilter, KitModel};

use super::{emit_failure, emit_failure_hiding_loading, EffectContext};
use crate::action::{
    blank_custom_fields, Action, AppAction, CustomFieldsChain, ItemsAction, KitModelsAction,
    LayoutAction,
};

pub async fn fetch_items<A: InventoryApi>(ctx: EffectContext<A>, filter: ItemFilter) {
    match ctx.api.items(&filter).await {
        Ok(list) => {
            ctx.emit(ItemsAction::FetchItemsSuccess {
                results: list.results,
            })
            .await;
        }
        Err(err) => {
            emit_failure(&ctx, err, |error| {
                Action::Items(ItemsAction::FetchItemsFail { error })
            })
            .await;
        }
    }
}

pub async fn create_item<A: InventoryApi>(
    ctx: EffectContext<A>,
    item: Item,
    fields: Vec<ItemCustomField>,
) {
    match ctx.api.create_item(&item).await {
        Ok(created) => {
            ctx.emit(ItemsAction::UpdateItemCustomFields(
                CustomFieldsChain::for_create(created, fields),
            ))
            .await;
        }
        Err(err) => {
            emit_failure_hiding_loading(&ctx, err, |error| {
                Action::Items(ItemsAction::CreateItemFail { error })
            })
            .await;
        }
    }
}

pub async fn update_item<A: InventoryApi>(
    ctx: EffectContext<A>,
    item: Item,
    fields: Vec<ItemCustomField>,
) {
    match ctx.api.update_item(&item, &item.barcode).await {
        Ok(updated) => {
            ctx.emit(ItemsAction::UpdateItemCustomFields(
                CustomFieldsChain::for_update(updated, fields),
            ))
            .await;
        }
        Err(err) => {
            emit_failure_hiding_loading(&ctx, err, |error| {
                Action::Items(ItemsAction::UpdateItemFail { error })
            })
            .await;
        }
    }
}

/// The shared tail of the create and update flows. All field writes must
/// land before the terminal sequence; the chain's constructors decide
/// which success/fail actions close it out.
pub async fn update_item_custom_fields<A: InventoryApi>(
    ctx: EffectContext<A>,
    chain: CustomFieldsChain,
) {
    let CustomFieldsChain {
        item,
        fields,
        on_success,
        on_fail,
    } = chain;

    let updates = fields.iter().map(|field| {
        ctx.api.update_item_custom_field(
            &item.barcode,
            field.custom_field_id,
            field.value.as_deref(),
        )
    });
    let result = try_join_all(updates).await;

    match result {
        Ok(_) => {
            ctx.emit(on_success(item)).await;
            ctx.emit(LayoutAction::HideLoadingMessage).await;
            ctx.emit(AppAction::ShowMessage {
                message: messages::ITEM_EDITED.to_string(),
            })
            .await;
            ctx.emit(AppAction::PopNav).await;
        }
        Err(err) => {
            let message = err.user_message();
            ctx.emit(on_fail(message.clone())).await;
            ctx.emit(LayoutAction::HideLoadingMessage).await;
            ctx.emit(AppAction::ShowMessage { message }).await;
        }
    }
}

pub async fn delete_item<A: InventoryApi>(ctx: EffectContext<A>, barcode: String) {
    match ctx.api.delete_item(&barcode).await {
        Ok(item) => {
            ctx.emit(ItemsAction::DeleteItemSuccess { item }).await;
            ctx.emit(LayoutAction::HideLoadingMessage).await;
            ctx.emit(AppAction::ShowMessage {
                message: messages::ITEM_DELETED.to_string(),
            })
            .await;
            ctx.emit(AppAction::PopNav).await;
        }
        Err(err) => {
            emit_failure_hiding_loading(&ctx, err, |error| {
                Action::Items(ItemsAction::DeleteItemFail { error })
            })
            .await;
        }
    }
}

pub async fn fetch_item_custom_fields<A: InventoryApi>(ctx: EffectContext<A>, barcode: String) {
    match ctx.api.item_custom_fields(&barcode).await {
        Ok(list) => {
            ctx.emit(ItemsAction::FetchItemCustomFieldsSuccess {
                fields: list.results,
            })
            .await;
        }
        Err(err) => {
            emit_failure(&ctx, err, |error| {
                Action::Items(ItemsAction::FetchItemCustomFieldsFail { error })
            })
            .await;
        }
    }
}

pub async fn fetch_custom_fields_by_category<A: InventoryApi>(
    ctx: EffectContext<A>,
    category_id: CategoryId,
) {
    match ctx.api.category_custom_fields(category_id).await {
        Ok(list) => {
            ctx.emit(ItemsAction::FetchCustomFieldsByCategorySuccess {
                fields: blank_custom_fields(list.results),
            })
            .await;
        }
        Err(err) => {
            emit_failure(&ctx, err, |error| {
                Action::Items(ItemsAction::FetchCustomFieldsByCategoryFail { error })
            })
            .await;
        }
    }
}

/// Kit commit: one create request per unit of every kit model, joined
/// all-or-nothing, then the temp list is reset and the kit screen popped.
pub async fn create_items<A: InventoryApi>(ctx: EffectContext<A>, kit_models: Vec<KitModel>) {
    let blanks: Vec<Item> = kit_models.iter().flat_map(expand).collect();
    let result = try_join_all(blanks.iter().map(|item| ctx.api.create_item(item))).await;

    match result {
        Ok(items) => {
            ctx.emit(ItemsAction::CreateItemsSuccess { items }).await;
            ctx.emit(KitModelsAction::ResetTemp).await;
            ctx.emit(LayoutAction::HideLoadingMessage).await;
            ctx.emit(AppAction::ShowMessage {
                message: messages::ITEMS_ADDED.to_string(),
            })
            .await;
            ctx.emit(AppAction::PopNav).await;
        }
        Err(err) => {
            emit_failure_hiding_loading(&ctx, err, |error| {
                Action::Items(ItemsAction::CreateItemsFail { error })
            })
            .await;
        }
    }
}

/// One create request per unit. The server assigns barcodes to blank
/// items and derives the category from the model.
fn expand(kit_model: &KitModel) -> impl Iterator<Item = Item> + '_ {
    (0..kit_model.quantity).map(move |_| Item {
        barcode: String::new(),
        brand_id: kit_model.brand_id,
        brand: kit_model.brand.clone(),
        model_id: kit_model.model_id,
        model: kit_model.model.clone(),
        category_id: 0,
        category: String::new(),
        available: true,
    })
}
