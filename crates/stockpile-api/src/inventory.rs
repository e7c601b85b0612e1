//! Inventory API operations
//!
//! This module provides the InventoryApi trait for everything the store's
//! effects need from the server: catalog lookups, item CRUD, custom fields,
//! kit contents and rentals. The HTTP implementation resolves endpoints from
//! the HAL root document; tests use the stub in `test_utils`.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use url::Url;

use stockpile_core::prelude::*;
use stockpile_core::types::{
    Brand, BrandId, Category, CategoryId, CustomField, CustomFieldId, Item, ItemCustomField,
    ItemFilter, KitId, KitModel, Model, Rental, RentalDetails, RentalId, ResultList,
};

use crate::client::{with_segment, ApiClient};

const BRANDS_LINK: &str = "brands";
const MODELS_LINK: &str = "models";
const CATEGORIES_LINK: &str = "categories";
const ITEMS_LINK: &str = "items";
const CUSTOM_FIELDS_LINK: &str = "customFields";
const KIT_MODELS_LINK: &str = "kitModels";
const RENTALS_LINK: &str = "rentals";

/// Inventory operations against the API server.
///
/// Effect tasks and the interactive shell both go through this trait.
#[trait_variant::make(InventoryApi: Send)]
pub trait LocalInventoryApi {
    /// All brands.
    async fn brands(&self) -> Result<ResultList<Brand>>;

    /// Create a brand by name.
    async fn create_brand(&self, name: &str) -> Result<Brand>;

    /// All models.
    async fn models(&self) -> Result<ResultList<Model>>;

    /// Create a model under a brand.
    async fn create_model(&self, brand_id: BrandId, name: &str) -> Result<Model>;

    /// All categories.
    async fn categories(&self) -> Result<ResultList<Category>>;

    /// Create a category by name.
    async fn create_category(&self, name: &str) -> Result<Category>;

    /// Items matching the filter.
    async fn items(&self, filter: &ItemFilter) -> Result<ResultList<Item>>;

    /// Look up one item by barcode.
    async fn item(&self, barcode: &str) -> Result<Item>;

    /// Create an item.
    async fn create_item(&self, item: &Item) -> Result<Item>;

    /// Update an item. `barcode` is the item's current barcode, which may
    /// differ from `item.barcode` when the barcode itself is being changed.
    async fn update_item(&self, item: &Item, barcode: &str) -> Result<Item>;

    /// Delete an item, returning the deleted record.
    async fn delete_item(&self, barcode: &str) -> Result<Item>;

    /// Custom field values stored on an item.
    async fn item_custom_fields(&self, barcode: &str) -> Result<ResultList<ItemCustomField>>;

    /// Write one custom field value on an item.
    async fn update_item_custom_field(
        &self,
        barcode: &str,
        field_id: CustomFieldId,
        value: Option<&str>,
    ) -> Result<()>;

    /// Custom field definitions for a category.
    async fn category_custom_fields(
        &self,
        category_id: CategoryId,
    ) -> Result<ResultList<CustomField>>;

    /// Component models of a kit.
    async fn kit_models(&self, kit_id: KitId) -> Result<ResultList<KitModel>>;

    /// The open rental for an item, if any. Errors when the item is not
    /// currently rented.
    async fn active_rental(&self, barcode: &str) -> Result<Rental>;

    /// Open a rental for an item.
    async fn rent(&self, barcode: &str, details: &RentalDetails) -> Result<Rental>;

    /// Close a rental.
    async fn return_rental(&self, rental_id: RentalId, returned_date: NaiveDate) -> Result<Rental>;
}

/// Implementation backed by the HTTP client.
pub struct HttpInventoryApi {
    client: Arc<ApiClient>,
}

impl HttpInventoryApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

impl InventoryApi for HttpInventoryApi {
    async fn brands(&self) -> Result<ResultList<Brand>> {
        let url = self.client.url_for(BRANDS_LINK)?;
        self.client.get_json(url).await
    }

    async fn create_brand(&self, name: &str) -> Result<Brand> {
        let url = self.client.url_for(BRANDS_LINK)?;
        self.client.post_json(url, &json!({ "name": name })).await
    }

    async fn models(&self) -> Result<ResultList<Model>> {
        let url = self.client.url_for(MODELS_LINK)?;
        self.client.get_json(url).await
    }

    async fn create_model(&self, brand_id: BrandId, name: &str) -> Result<Model> {
        let url = self.client.url_for(MODELS_LINK)?;
        let body = json!({ "name": name, "brandID": brand_id });
        self.client.post_json(url, &body).await
    }

    async fn categories(&self) -> Result<ResultList<Category>> {
        let url = self.client.url_for(CATEGORIES_LINK)?;
        self.client.get_json(url).await
    }

    async fn create_category(&self, name: &str) -> Result<Category> {
        let url = self.client.url_for(CATEGORIES_LINK)?;
        self.client.post_json(url, &json!({ "name": name })).await
    }

    async fn items(&self, filter: &ItemFilter) -> Result<ResultList<Item>> {
        let mut url = self.client.url_for(ITEMS_LINK)?;
        apply_filter(&mut url, filter);
        self.client.get_json(url).await
    }

    async fn item(&self, barcode: &str) -> Result<Item> {
        let url = with_segment(self.client.url_for(ITEMS_LINK)?, barcode)?;
        self.client.get_json(url).await
    }

    async fn create_item(&self, item: &Item) -> Result<Item> {
        let url = self.client.url_for(ITEMS_LINK)?;
        self.client.post_json(url, item).await
    }

    async fn update_item(&self, item: &Item, barcode: &str) -> Result<Item> {
        let url = with_segment(self.client.url_for(ITEMS_LINK)?, barcode)?;
        self.client.put_json(url, item).await
    }

    async fn delete_item(&self, barcode: &str) -> Result<Item> {
        let url = with_segment(self.client.url_for(ITEMS_LINK)?, barcode)?;
        self.client.delete_json(url).await
    }

    async fn item_custom_fields(&self, barcode: &str) -> Result<ResultList<ItemCustomField>> {
        let url = with_segment(self.client.url_for(ITEMS_LINK)?, barcode)?;
        let url = with_segment(url, "customFields")?;
        self.client.get_json(url).await
    }

    async fn update_item_custom_field(
        &self,
        barcode: &str,
        field_id: CustomFieldId,
        value: Option<&str>,
    ) -> Result<()> {
        let url = with_segment(self.client.url_for(ITEMS_LINK)?, barcode)?;
        let url = with_segment(url, "customFields")?;
        let url = with_segment(url, &field_id.to_string())?;
        self.client.put_no_content(url, &json!({ "value": value })).await
    }

    async fn category_custom_fields(
        &self,
        category_id: CategoryId,
    ) -> Result<ResultList<CustomField>> {
        let mut url = self.client.url_for(CUSTOM_FIELDS_LINK)?;
        url.query_pairs_mut()
            .append_pair("categoryID", &category_id.to_string());
        self.client.get_json(url).await
    }

    async fn kit_models(&self, kit_id: KitId) -> Result<ResultList<KitModel>> {
        let url = with_segment(self.client.url_for(KIT_MODELS_LINK)?, &kit_id.to_string())?;
        self.client.get_json(url).await
    }

    async fn active_rental(&self, barcode: &str) -> Result<Rental> {
        let url = with_segment(self.client.url_for(RENTALS_LINK)?, "active")?;
        let url = with_segment(url, barcode)?;
        self.client.get_json(url).await
    }

    async fn rent(&self, barcode: &str, details: &RentalDetails) -> Result<Rental> {
        let url = self.client.url_for(RENTALS_LINK)?;
        // The server expects the rental details with the barcode spliced in.
        let mut body = serde_json::to_value(details)?;
        if let serde_json::Value::Object(ref mut fields) = body {
            fields.insert(
                "barcode".to_string(),
                serde_json::Value::String(barcode.to_string()),
            );
        }
        self.client.post_json(url, &body).await
    }

    async fn return_rental(&self, rental_id: RentalId, returned_date: NaiveDate) -> Result<Rental> {
        let url = with_segment(self.client.url_for(RENTALS_LINK)?, &rental_id.to_string())?;
        self.client
            .put_json(url, &json!({ "returnedDate": returned_date }))
            .await
    }
}

/// Append the filter's set fields as query parameters, using the server's
/// wire names.
pub(crate) fn apply_filter(url: &mut Url, filter: &ItemFilter) {
    if filter.is_empty() {
        return;
    }
    let mut pairs = url.query_pairs_mut();
    if let Some(id) = filter.brand_id {
        pairs.append_pair("brandID", &id.to_string());
    }
    if let Some(id) = filter.model_id {
        pairs.append_pair("modelID", &id.to_string());
    }
    if let Some(id) = filter.category_id {
        pairs.append_pair("categoryID", &id.to_string());
    }
    if let Some(available) = filter.available {
        pairs.append_pair("available", if available { "true" } else { "false" });
    }
}
