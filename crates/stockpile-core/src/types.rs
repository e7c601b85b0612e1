//! Domain entities for the Stockpile inventory
//!
//! Plain records keyed by stable identifiers, shaped to match the API's
//! JSON wire names (`brandID`, `rentedDate`, ...). List endpoints wrap
//! their payloads in a [`ResultList`] envelope.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type BrandId = i64;
pub type ModelId = i64;
pub type CategoryId = i64;
pub type KitId = i64;
pub type RentalId = i64;
pub type CustomFieldId = i64;
pub type UserId = i64;

/// Envelope for list responses: `{"results": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultList<T> {
    pub results: Vec<T>,
}

impl<T> ResultList<T> {
    pub fn new(results: Vec<T>) -> Self {
        Self { results }
    }
}

impl<T> Default for ResultList<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Catalog Entities
// ─────────────────────────────────────────────────────────────────

/// Access to the id and display name shared by the catalog entities
/// (brands, models, categories). The generic catalog state and reducers
/// are written against this trait.
pub trait CatalogEntity: Clone {
    type Id: std::hash::Hash + Ord + Copy + std::fmt::Debug;

    fn id(&self) -> Self::Id;
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    #[serde(rename = "brandID")]
    pub brand_id: BrandId,
    pub name: String,
}

impl CatalogEntity for Brand {
    type Id = BrandId;

    fn id(&self) -> BrandId {
        self.brand_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A model always belongs to a brand. Selecting a different brand on an
/// item invalidates its model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(rename = "modelID")]
    pub model_id: ModelId,
    #[serde(rename = "brandID")]
    pub brand_id: BrandId,
    pub name: String,
}

impl CatalogEntity for Model {
    type Id = ModelId;

    fn id(&self) -> ModelId {
        self.model_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "categoryID")]
    pub category_id: CategoryId,
    pub name: String,
}

impl CatalogEntity for Category {
    type Id = CategoryId;

    fn id(&self) -> CategoryId {
        self.category_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ─────────────────────────────────────────────────────────────────
// Inventory Items
// ─────────────────────────────────────────────────────────────────

/// An inventory item. The barcode is the primary key; brand/model/category
/// names are denormalized for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub barcode: String,
    #[serde(rename = "brandID")]
    pub brand_id: BrandId,
    pub brand: String,
    #[serde(rename = "modelID")]
    pub model_id: ModelId,
    pub model: String,
    #[serde(rename = "categoryID")]
    pub category_id: CategoryId,
    pub category: String,
    /// False while an active rental exists for this barcode.
    pub available: bool,
}

/// Optional criteria for the filtered items fetch. Unset fields match all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    pub brand_id: Option<BrandId>,
    pub model_id: Option<ModelId>,
    pub category_id: Option<CategoryId>,
    pub available: Option<bool>,
}

impl ItemFilter {
    /// True when no criteria are set.
    pub fn is_empty(&self) -> bool {
        self.brand_id.is_none()
            && self.model_id.is_none()
            && self.category_id.is_none()
            && self.available.is_none()
    }
}

/// A provisional batch-item entry: "quantity items of this brand+model".
/// Held in a temporary list until the kit is committed; `kit_id` is only
/// present once persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitModel {
    #[serde(rename = "kitID", skip_serializing_if = "Option::is_none")]
    pub kit_id: Option<KitId>,
    #[serde(rename = "brandID")]
    pub brand_id: BrandId,
    pub brand: String,
    #[serde(rename = "modelID")]
    pub model_id: ModelId,
    pub model: String,
    pub quantity: u32,
}

// ─────────────────────────────────────────────────────────────────
// Custom Fields
// ─────────────────────────────────────────────────────────────────

/// A custom field definition, scoped to a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    #[serde(rename = "customFieldID")]
    pub custom_field_id: CustomFieldId,
    #[serde(rename = "categoryID")]
    pub category_id: CategoryId,
    pub name: String,
}

/// A custom field value on an item. `value` is unset for fields the user
/// has not filled in yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCustomField {
    #[serde(rename = "customFieldID")]
    pub custom_field_id: CustomFieldId,
    pub name: String,
    pub value: Option<String>,
}

impl From<CustomField> for ItemCustomField {
    fn from(field: CustomField) -> Self {
        Self {
            custom_field_id: field.custom_field_id,
            name: field.name,
            value: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Rentals
// ─────────────────────────────────────────────────────────────────

/// A rental record. An item has at most one active rental at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    #[serde(rename = "rentalID")]
    pub rental_id: RentalId,
    pub barcode: String,
    pub rented_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returned_date: Option<NaiveDate>,
}

impl Rental {
    /// An active rental has no returned date yet.
    pub fn is_active(&self) -> bool {
        self.returned_date.is_none()
    }
}

/// Rental details collected before submitting a rent request. The item
/// barcodes come from the checklist, not from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalDetails {
    pub rented_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_return_date: Option<NaiveDate>,
}

/// What a rental checklist is doing: checking items out or back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalKind {
    Rent,
    Return,
}

impl RentalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalKind::Rent => "rent",
            RentalKind::Return => "return",
        }
    }
}

impl std::fmt::Display for RentalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────
// Auth
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "userID")]
    pub user_id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful login payload. The token is persisted as `id_token` and
/// attached to subsequent requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entity_accessors() {
        let brand = Brand {
            brand_id: 1,
            name: "Sony".to_string(),
        };
        assert_eq!(brand.id(), 1);
        assert_eq!(brand.name(), "Sony");

        let model = Model {
            model_id: 7,
            brand_id: 1,
            name: "A7".to_string(),
        };
        assert_eq!(model.id(), 7);
        assert_eq!(model.name(), "A7");

        let category = Category {
            category_id: 3,
            name: "Cameras".to_string(),
        };
        assert_eq!(category.id(), 3);
        assert_eq!(category.name(), "Cameras");
    }

    #[test]
    fn test_brand_wire_names() {
        let brand: Brand = serde_json::from_str(r#"{"brandID": 1, "name": "Sony"}"#).unwrap();
        assert_eq!(brand.brand_id, 1);
        assert_eq!(brand.name, "Sony");

        let json = serde_json::to_value(&brand).unwrap();
        assert!(json.get("brandID").is_some());
    }

    #[test]
    fn test_rental_wire_names() {
        let rental: Rental = serde_json::from_str(
            r#"{"rentalID": 9, "barcode": "1234", "rentedDate": "2017-03-01"}"#,
        )
        .unwrap();
        assert_eq!(rental.rental_id, 9);
        assert!(rental.is_active());

        let closed = Rental {
            returned_date: Some(NaiveDate::from_ymd_opt(2017, 3, 8).unwrap()),
            ..rental
        };
        assert!(!closed.is_active());
    }

    #[test]
    fn test_item_custom_field_from_definition() {
        let field = CustomField {
            custom_field_id: 4,
            category_id: 3,
            name: "Serial number".to_string(),
        };
        let item_field = ItemCustomField::from(field);
        assert_eq!(item_field.custom_field_id, 4);
        assert_eq!(item_field.name, "Serial number");
        assert!(item_field.value.is_none());
    }

    #[test]
    fn test_result_list_envelope() {
        let list: ResultList<Brand> =
            serde_json::from_str(r#"{"results": [{"brandID": 1, "name": "Sony"}]}"#).unwrap();
        assert_eq!(list.results.len(), 1);

        let empty = ResultList::<Brand>::default();
        assert!(empty.results.is_empty());
    }

    #[test]
    fn test_rental_kind_as_str() {
        assert_eq!(RentalKind::Rent.as_str(), "rent");
        assert_eq!(RentalKind::Return.as_str(), "return");
        assert_eq!(RentalKind::Return.to_string(), "return");
    }

    #[test]
    fn test_kit_model_omits_missing_kit_id() {
        let temp = KitModel {
            kit_id: None,
            brand_id: 1,
            brand: "Sony".to_string(),
            model_id: 7,
            model: "A7".to_string(),
            quantity: 2,
        };
        let json = serde_json::to_value(&temp).unwrap();
        assert!(json.get("kitID").is_none());
    }
}
