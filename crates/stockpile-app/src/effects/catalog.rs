//! Catalog effects: brand, model, category and kit-model round-trips
//!
//! Catalog screens show their own slice spinner instead of the modal
//! loading message, so failures here notify without a hide action.

use stockpile_api::inventory::InventoryApi;
use stockpile_core::types::{BrandId, KitId};

use super::{emit_failure, EffectContext};
use crate::action::{Action, BrandsAction, CategoriesAction, KitModelsAction, ModelsAction};

pub async fn fetch_brands<A: InventoryApi>(ctx: EffectContext<A>) {
    match ctx.api.brands().await {
        Ok(list) => {
            ctx.emit(BrandsAction::FetchSuccess {
                results: list.results,
            })
            .await;
        }
        Err(err) => {
            emit_failure(&ctx, err, |error| {
                Action::Brands(BrandsAction::FetchFail { error })
            })
            .await;
        }
    }
}

pub async fn create_brand<A: InventoryApi>(ctx: EffectContext<A>, name: String) {
    match ctx.api.create_brand(&name).await {
        Ok(brand) => {
            ctx.emit(BrandsAction::CreateSuccess { brand }).await;
        }
        Err(err) => {
            emit_failure(&ctx, err, |error| {
                Action::Brands(BrandsAction::CreateFail { error })
            })
            .await;
        }
    }
}

pub async fn fetch_models<A: InventoryApi>(ctx: EffectContext<A>) {
    match ctx.api.models().await {
        Ok(list) => {
            ctx.emit(ModelsAction::FetchSuccess {
                results: list.results,
            })
            .await;
        }
        Err(err) => {
            emit_failure(&ctx, err, |error| {
                Action::Models(ModelsAction::FetchFail { error })
            })
            .await;
        }
    }
}

pub async fn create_model<A: InventoryApi>(ctx: EffectContext<A>, brand_id: BrandId, name: String) {
    match ctx.api.create_model(brand_id, &name).await {
        Ok(model) => {
            ctx.emit(ModelsAction::CreateSuccess { model }).await;
        }
        Err(err) => {
            emit_failure(&ctx, err, |error| {
                Action::Models(ModelsAction::CreateFail { error })
            })
            .await;
        }
    }
}

pub async fn fetch_categories<A: InventoryApi>(ctx: EffectContext<A>) {
    match ctx.api.categories().await {
        Ok(list) => {
            ctx.emit(CategoriesAction::FetchSuccess {
                results: list.results,
            })
            .await;
        }
        Err(err) => {
            emit_failure(&ctx, err, |error| {
                Action::Categories(CategoriesAction::FetchFail { error })
            })
            .await;
        }
    }
}

pub async fn create_category<A: InventoryApi>(ctx: EffectContext<A>, name: String) {
    match ctx.api.create_category(&name).await {
        Ok(category) => {
            ctx.emit(CategoriesAction::CreateSuccess { category }).await;
        }
        Err(err) => {
            emit_failure(&ctx, err, |error| {
                Action::Categories(CategoriesAction::CreateFail { error })
            })
            .await;
        }
    }
}

pub async fn fetch_kit_models<A: InventoryApi>(ctx: EffectContext<A>, kit_id: KitId) {
    match ctx.api.kit_models(kit_id).await {
        Ok(list) => {
            ctx.emit(KitModelsAction::FetchSuccess {
                kit_id,
                results: list.results,
            })
            .await;
        }
        Err(err) => {
            emit_failure(&ctx, err, |error| {
                Action::KitModels(KitModelsAction::FetchFail { error })
            })
            .await;
        }
    }
}
