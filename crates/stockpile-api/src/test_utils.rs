//! Test utilities for the inventory API
//!
//! Provides fixture constructors for the domain types and an in-memory
//! InventoryApi implementation that records calls and can be told to fail
//! specific methods.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use stockpile_core::prelude::*;
use stockpile_core::types::{
    Brand, BrandId, Category, CategoryId, CustomField, CustomFieldId, Item, ItemCustomField,
    ItemFilter, KitId, KitModel, Model, ModelId, Rental, RentalDetails, RentalId, ResultList,
};

use crate::inventory::InventoryApi;

/// Creates a test brand.
pub fn test_brand(id: BrandId, name: &str) -> Brand {
    Brand {
        brand_id: id,
        name: name.to_string(),
    }
}

/// Creates a test model under a brand.
pub fn test_model(id: ModelId, brand_id: BrandId, name: &str) -> Model {
    Model {
        model_id: id,
        brand_id,
        name: name.to_string(),
    }
}

/// Creates a test category.
pub fn test_category(id: CategoryId, name: &str) -> Category {
    Category {
        category_id: id,
        name: name.to_string(),
    }
}

/// Creates an available test item with catalog defaults.
///
/// # Arguments
/// * `barcode` - Item barcode
pub fn test_item(barcode: &str) -> Item {
    Item {
        barcode: barcode.to_string(),
        brand_id: 1,
        brand: "Fender".to_string(),
        model_id: 1,
        model: "Stratocaster".to_string(),
        category_id: 1,
        category: "Guitars".to_string(),
        available: true,
    }
}

/// Creates a test item that is currently rented out.
pub fn test_item_unavailable(barcode: &str) -> Item {
    Item {
        available: false,
        ..test_item(barcode)
    }
}

/// Creates a custom field definition for a category.
pub fn test_custom_field(id: CustomFieldId, category_id: CategoryId, name: &str) -> CustomField {
    CustomField {
        custom_field_id: id,
        category_id,
        name: name.to_string(),
    }
}

/// Creates a stored custom field value on an item.
pub fn test_item_custom_field(
    id: CustomFieldId,
    name: &str,
    value: Option<&str>,
) -> ItemCustomField {
    ItemCustomField {
        custom_field_id: id,
        name: name.to_string(),
        value: value.map(str::to_string),
    }
}

/// Creates an open rental started on the given ISO date.
pub fn test_rental(id: RentalId, barcode: &str, rented_date: &str) -> Rental {
    Rental {
        rental_id: id,
        barcode: barcode.to_string(),
        rented_date: rented_date.parse().expect("valid ISO date"),
        returned_date: None,
    }
}

/// Creates a provisional kit entry for a model.
pub fn test_kit_model(model_id: ModelId, quantity: u32) -> KitModel {
    KitModel {
        kit_id: None,
        brand_id: 1,
        brand: "Fender".to_string(),
        model_id,
        model: format!("Model {}", model_id),
        quantity,
    }
}

#[derive(Default)]
struct StubState {
    brands: Vec<Brand>,
    models: Vec<Model>,
    categories: Vec<Category>,
    items: Vec<Item>,
    item_custom_fields: HashMap<String, Vec<ItemCustomField>>,
    category_custom_fields: HashMap<CategoryId, Vec<CustomField>>,
    kit_models: HashMap<KitId, Vec<KitModel>>,
    active_rentals: HashMap<String, Rental>,
    closed_rentals: Vec<Rental>,
    failures: HashMap<String, String>,
    calls: Vec<String>,
    next_id: i64,
}

/// In-memory InventoryApi for tests.
///
/// Seed it with entities, optionally inject failures per trait method, then
/// assert on the recorded calls and the resulting state.
pub struct StubInventoryApi {
    inner: Mutex<StubState>,
}

impl Default for StubInventoryApi {
    fn default() -> Self {
        Self::new()
    }
}

impl StubInventoryApi {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StubState {
                next_id: 1000,
                ..StubState::default()
            }),
        }
    }

    pub fn add_brand(&self, brand: Brand) {
        self.inner.lock().unwrap().brands.push(brand);
    }

    pub fn add_model(&self, model: Model) {
        self.inner.lock().unwrap().models.push(model);
    }

    pub fn add_category(&self, category: Category) {
        self.inner.lock().unwrap().categories.push(category);
    }

    pub fn add_item(&self, item: Item) {
        self.inner.lock().unwrap().items.push(item);
    }

    pub fn add_item_custom_fields(&self, barcode: &str, fields: Vec<ItemCustomField>) {
        self.inner
            .lock()
            .unwrap()
            .item_custom_fields
            .insert(barcode.to_string(), fields);
    }

    pub fn add_category_custom_fields(&self, category_id: CategoryId, fields: Vec<CustomField>) {
        self.inner
            .lock()
            .unwrap()
            .category_custom_fields
            .insert(category_id, fields);
    }

    pub fn add_kit_models(&self, kit_id: KitId, models: Vec<KitModel>) {
        self.inner.lock().unwrap().kit_models.insert(kit_id, models);
    }

    pub fn add_active_rental(&self, rental: Rental) {
        self.inner
            .lock()
            .unwrap()
            .active_rentals
            .insert(rental.barcode.clone(), rental);
    }

    /// Make the named trait method fail with an API error carrying `message`.
    pub fn fail_on(&self, method: &str, message: &str) {
        self.inner
            .lock()
            .unwrap()
            .failures
            .insert(method.to_string(), message.to_string());
    }

    /// Every call made so far, as "method args" strings in order.
    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Current item list, for asserting on writes.
    pub fn current_items(&self) -> Vec<Item> {
        self.inner.lock().unwrap().items.clone()
    }

    /// The open rental for a barcode, if one exists.
    pub fn active_rental_for(&self, barcode: &str) -> Option<Rental> {
        self.inner.lock().unwrap().active_rentals.get(barcode).cloned()
    }

    /// Rentals that have been closed, in close order.
    pub fn closed_rentals(&self) -> Vec<Rental> {
        self.inner.lock().unwrap().closed_rentals.clone()
    }

    /// Stored custom field values for a barcode.
    pub fn custom_fields_for(&self, barcode: &str) -> Vec<ItemCustomField> {
        self.inner
            .lock()
            .unwrap()
            .item_custom_fields
            .get(barcode)
            .cloned()
            .unwrap_or_default()
    }

    fn guard(&self, method: &str, call: String) -> Result<MutexGuard<'_, StubState>> {
        let mut state = self.inner.lock().unwrap();
        state.calls.push(call);
        if let Some(message) = state.failures.get(method) {
            return Err(Error::api(message.clone()));
        }
        Ok(state)
    }
}

fn bump(state: &mut StubState) -> i64 {
    state.next_id += 1;
    state.next_id
}

fn matches_filter(item: &Item, filter: &ItemFilter) -> bool {
    filter.brand_id.map_or(true, |id| item.brand_id == id)
        && filter.model_id.map_or(true, |id| item.model_id == id)
        && filter.category_id.map_or(true, |id| item.category_id == id)
        && filter.available.map_or(true, |a| item.available == a)
}

impl InventoryApi for StubInventoryApi {
    async fn brands(&self) -> Result<ResultList<Brand>> {
        let state = self.guard("brands", "brands".to_string())?;
        Ok(ResultList::new(state.brands.clone()))
    }

    async fn create_brand(&self, name: &str) -> Result<Brand> {
        let mut state = self.guard("create_brand", format!("create_brand {}", name))?;
        let brand = test_brand(bump(&mut state), name);
        state.brands.push(brand.clone());
        Ok(brand)
    }

    async fn models(&self) -> Result<ResultList<Model>> {
        let state = self.guard("models", "models".to_string())?;
        Ok(ResultList::new(state.models.clone()))
    }

    async fn create_model(&self, brand_id: BrandId, name: &str) -> Result<Model> {
        let mut state =
            self.guard("create_model", format!("create_model {} {}", brand_id, name))?;
        let model = test_model(bump(&mut state), brand_id, name);
        state.models.push(model.clone());
        Ok(model)
    }

    async fn categories(&self) -> Result<ResultList<Category>> {
        let state = self.guard("categories", "categories".to_string())?;
        Ok(ResultList::new(state.categories.clone()))
    }

    async fn create_category(&self, name: &str) -> Result<Category> {
        let mut state = self.guard("create_category", format!("create_category {}", name))?;
        let category = test_category(bump(&mut state), name);
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn items(&self, filter: &ItemFilter) -> Result<ResultList<Item>> {
        let state = self.guard("items", "items".to_string())?;
        let matching = state
            .items
            .iter()
            .filter(|item| matches_filter(item, filter))
            .cloned()
            .collect();
        Ok(ResultList::new(matching))
    }

    async fn item(&self, barcode: &str) -> Result<Item> {
        let state = self.guard("item", format!("item {}", barcode))?;
        state
            .items
            .iter()
            .find(|item| item.barcode == barcode)
            .cloned()
            .ok_or_else(|| Error::api("Item not found"))
    }

    // An empty barcode gets a server-assigned one, like the real API does
    // for items created from a kit.
    async fn create_item(&self, item: &Item) -> Result<Item> {
        let mut state = self.guard("create_item", format!("create_item {}", item.barcode))?;
        let mut item = item.clone();
        if item.barcode.is_empty() {
            item.barcode = bump(&mut state).to_string();
        } else if state.items.iter().any(|i| i.barcode == item.barcode) {
            return Err(Error::api("Barcode already exists"));
        }
        state.items.push(item.clone());
        Ok(item)
    }

    async fn update_item(&self, item: &Item, barcode: &str) -> Result<Item> {
        let mut state = self.guard("update_item", format!("update_item {}", barcode))?;
        let slot = state
            .items
            .iter_mut()
            .find(|i| i.barcode == barcode)
            .ok_or_else(|| Error::api("Item not found"))?;
        *slot = item.clone();
        Ok(item.clone())
    }

    async fn delete_item(&self, barcode: &str) -> Result<Item> {
        let mut state = self.guard("delete_item", format!("delete_item {}", barcode))?;
        let index = state
            .items
            .iter()
            .position(|i| i.barcode == barcode)
            .ok_or_else(|| Error::api("Item not found"))?;
        Ok(state.items.remove(index))
    }

    async fn item_custom_fields(&self, barcode: &str) -> Result<ResultList<ItemCustomField>> {
        let state = self.guard("item_custom_fields", format!("item_custom_fields {}", barcode))?;
        let fields = state
            .item_custom_fields
            .get(barcode)
            .cloned()
            .unwrap_or_default();
        Ok(ResultList::new(fields))
    }

    async fn update_item_custom_field(
        &self,
        barcode: &str,
        field_id: CustomFieldId,
        value: Option<&str>,
    ) -> Result<()> {
        let mut state = self.guard(
            "update_item_custom_field",
            format!("update_item_custom_field {} {}", barcode, field_id),
        )?;
        let fields = state
            .item_custom_fields
            .entry(barcode.to_string())
            .or_default();
        match fields.iter_mut().find(|f| f.custom_field_id == field_id) {
            Some(field) => field.value = value.map(str::to_string),
            None => fields.push(ItemCustomField {
                custom_field_id: field_id,
                name: String::new(),
                value: value.map(str::to_string),
            }),
        }
        Ok(())
    }

    async fn category_custom_fields(
        &self,
        category_id: CategoryId,
    ) -> Result<ResultList<CustomField>> {
        let state = self.guard(
            "category_custom_fields",
            format!("category_custom_fields {}", category_id),
        )?;
        let fields = state
            .category_custom_fields
            .get(&category_id)
            .cloned()
            .unwrap_or_default();
        Ok(ResultList::new(fields))
    }

    async fn kit_models(&self, kit_id: KitId) -> Result<ResultList<KitModel>> {
        let state = self.guard("kit_models", format!("kit_models {}", kit_id))?;
        let models = state.kit_models.get(&kit_id).cloned().unwrap_or_default();
        Ok(ResultList::new(models))
    }

    async fn active_rental(&self, barcode: &str) -> Result<Rental> {
        let state = self.guard("active_rental", format!("active_rental {}", barcode))?;
        state
            .active_rentals
            .get(barcode)
            .cloned()
            .ok_or_else(|| Error::api("No active rental for item"))
    }

    async fn rent(&self, barcode: &str, details: &RentalDetails) -> Result<Rental> {
        let mut state = self.guard("rent", format!("rent {}", barcode))?;
        if state.active_rentals.contains_key(barcode) {
            return Err(Error::api("Item is already rented"));
        }
        let rental = Rental {
            rental_id: bump(&mut state),
            barcode: barcode.to_string(),
            rented_date: details.rented_date,
            returned_date: None,
        };
        state.active_rentals.insert(barcode.to_string(), rental.clone());
        if let Some(item) = state.items.iter_mut().find(|i| i.barcode == barcode) {
            item.available = false;
        }
        Ok(rental)
    }

    async fn return_rental(&self, rental_id: RentalId, returned_date: NaiveDate) -> Result<Rental> {
        let mut state = self.guard("return_rental", format!("return_rental {}", rental_id))?;
        let barcode = state
            .active_rentals
            .iter()
            .find(|(_, rental)| rental.rental_id == rental_id)
            .map(|(barcode, _)| barcode.clone())
            .ok_or_else(|| Error::api("Rental not found"))?;
        let mut rental = state.active_rentals.remove(&barcode).unwrap();
        rental.returned_date = Some(returned_date);
        state.closed_rentals.push(rental.clone());
        if let Some(item) = state.items.iter_mut().find(|i| i.barcode == barcode) {
            item.available = true;
        }
        Ok(rental)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_records_calls_in_order() {
        let api = StubInventoryApi::new();
        api.add_item(test_item("9000001"));

        api.item("9000001").await.unwrap();
        api.brands().await.unwrap();

        assert_eq!(api.calls(), vec!["item 9000001", "brands"]);
    }

    #[tokio::test]
    async fn test_fail_on_injects_error() {
        let api = StubInventoryApi::new();
        api.fail_on("brands", "Server exploded");

        let err = api.brands().await.unwrap_err();
        assert_eq!(err.user_message(), "Server exploded");
        // The failed call is still recorded.
        assert_eq!(api.calls(), vec!["brands"]);
    }

    #[tokio::test]
    async fn test_rent_and_return_roundtrip() {
        let api = StubInventoryApi::new();
        api.add_item(test_item("9000001"));

        let details = RentalDetails {
            rented_date: "2026-08-24".parse().unwrap(),
            expected_return_date: None,
        };
        let rental = api.rent("9000001", &details).await.unwrap();
        assert!(!api.current_items()[0].available);
        assert!(api.active_rental_for("9000001").is_some());

        let closed = api
            .return_rental(rental.rental_id, "2026-08-30".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(closed.returned_date, Some("2026-08-30".parse().unwrap()));
        assert!(api.current_items()[0].available);
        assert!(api.active_rental_for("9000001").is_none());
    }

    #[tokio::test]
    async fn test_rent_rejects_double_rental() {
        let api = StubInventoryApi::new();
        api.add_item(test_item("9000001"));
        let details = RentalDetails {
            rented_date: "2026-08-24".parse().unwrap(),
            expected_return_date: None,
        };

        api.rent("9000001", &details).await.unwrap();
        assert!(api.rent("9000001", &details).await.is_err());
    }

    #[tokio::test]
    async fn test_items_applies_filter() {
        let api = StubInventoryApi::new();
        api.add_item(test_item("9000001"));
        api.add_item(Item {
            brand_id: 2,
            brand: "Gibson".to_string(),
            ..test_item("9000002")
        });
        api.add_item(test_item_unavailable("9000003"));

        let filter = ItemFilter {
            brand_id: Some(1),
            available: Some(true),
            ..Default::default()
        };
        let result = api.items(&filter).await.unwrap();
        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].barcode, "9000001");
    }

    #[tokio::test]
    async fn test_update_item_custom_field_upserts() {
        let api = StubInventoryApi::new();
        api.add_item_custom_fields(
            "9000001",
            vec![test_item_custom_field(7, "Color", Some("Sunburst"))],
        );

        api.update_item_custom_field("9000001", 7, Some("Black"))
            .await
            .unwrap();
        api.update_item_custom_field("9000001", 8, Some("22"))
            .await
            .unwrap();

        let fields = api.custom_fields_for("9000001");
        assert_eq!(fields[0].value.as_deref(), Some("Black"));
        assert_eq!(fields.len(), 2);
    }
}
