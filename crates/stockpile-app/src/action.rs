//! Action types for the store (TEA pattern)
//!
//! One sub-enum per entity domain, composed into the closed [`Action`] enum
//! the store dispatches. Failure variants carry the user-facing message
//! rather than the error value so actions stay cheaply cloneable on the
//! broadcast stream.

use chrono::NaiveDate;

use stockpile_core::types::{
    Brand, BrandId, Category, CategoryId, CustomField, Item, ItemCustomField, ItemFilter, KitId,
    KitModel, Model, ModelId, RentalDetails, RentalKind,
};

/// Screens the outer shell can be asked to push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// The rental checklist, in rent or return mode.
    Rental { kind: RentalKind },
}

/// Payload of the custom-fields update chain.
///
/// Item create and update both funnel into this intermediate action; the
/// terminal success/fail constructors ride along so the fan-out join and
/// its emission order are independent of which flow started the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomFieldsChain {
    /// The item as returned by the create/update call.
    pub item: Item,
    pub fields: Vec<ItemCustomField>,
    pub on_success: fn(Item) -> Action,
    pub on_fail: fn(String) -> Action,
}

impl CustomFieldsChain {
    /// Chain stage for the create-item flow.
    pub fn for_create(item: Item, fields: Vec<ItemCustomField>) -> Self {
        Self {
            item,
            fields,
            on_success: |item| Action::Items(ItemsAction::CreateItemSuccess { item }),
            on_fail: |error| Action::Items(ItemsAction::CreateItemFail { error }),
        }
    }

    /// Chain stage for the update-item flow.
    pub fn for_update(item: Item, fields: Vec<ItemCustomField>) -> Self {
        Self {
            item,
            fields,
            on_success: |item| Action::Items(ItemsAction::UpdateItemSuccess { item }),
            on_fail: |error| Action::Items(ItemsAction::UpdateItemFail { error }),
        }
    }
}

/// Brand catalog actions.
#[derive(Debug, Clone, PartialEq)]
pub enum BrandsAction {
    Fetch,
    FetchSuccess { results: Vec<Brand> },
    FetchFail { error: String },
    /// Local refiltering of the already-fetched catalog.
    Filter { query: String },
    Create { name: String },
    CreateSuccess { brand: Brand },
    CreateFail { error: String },
}

/// Model catalog actions.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelsAction {
    Fetch,
    FetchSuccess { results: Vec<Model> },
    FetchFail { error: String },
    Filter { query: String },
    Create { brand_id: BrandId, name: String },
    CreateSuccess { model: Model },
    CreateFail { error: String },
}

/// Category catalog actions.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoriesAction {
    Fetch,
    FetchSuccess { results: Vec<Category> },
    FetchFail { error: String },
    Filter { query: String },
    Create { name: String },
    CreateSuccess { category: Category },
    CreateFail { error: String },
}

/// Item CRUD, custom fields and batch create.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemsAction {
    // ─────────────────────────────────────────────────────────
    // Fetching
    // ─────────────────────────────────────────────────────────
    FetchItems { filter: ItemFilter },
    FetchItemsSuccess { results: Vec<Item> },
    FetchItemsFail { error: String },

    // ─────────────────────────────────────────────────────────
    // Create / update / delete
    // ─────────────────────────────────────────────────────────
    CreateItem { item: Item, fields: Vec<ItemCustomField> },
    CreateItemSuccess { item: Item },
    CreateItemFail { error: String },
    UpdateItem { item: Item, fields: Vec<ItemCustomField> },
    UpdateItemSuccess { item: Item },
    UpdateItemFail { error: String },
    /// Intermediate stage both create and update chain through.
    UpdateItemCustomFields(CustomFieldsChain),
    DeleteItem { barcode: String },
    DeleteItemSuccess { item: Item },
    DeleteItemFail { error: String },

    // ─────────────────────────────────────────────────────────
    // Custom fields
    // ─────────────────────────────────────────────────────────
    FetchItemCustomFields { barcode: String },
    FetchItemCustomFieldsSuccess { fields: Vec<ItemCustomField> },
    FetchItemCustomFieldsFail { error: String },
    /// Definitions for a category, surfaced as value-less entries.
    FetchCustomFieldsByCategory { category_id: CategoryId },
    FetchCustomFieldsByCategorySuccess { fields: Vec<ItemCustomField> },
    FetchCustomFieldsByCategoryFail { error: String },

    // ─────────────────────────────────────────────────────────
    // Kit commit (batch create)
    // ─────────────────────────────────────────────────────────
    CreateItems { kit_models: Vec<KitModel> },
    CreateItemsSuccess { items: Vec<Item> },
    CreateItemsFail { error: String },
}

/// Kit contents and the provisional kit-model list.
#[derive(Debug, Clone, PartialEq)]
pub enum KitModelsAction {
    Fetch { kit_id: KitId },
    FetchSuccess { kit_id: KitId, results: Vec<KitModel> },
    FetchFail { error: String },
    CreateTemp { kit_model: KitModel },
    UpdateTemp { kit_model: KitModel },
    DeleteTemp { model_id: ModelId },
    ResetTemp,
}

/// The rental checklist workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum RentalsAction {
    StartRental { barcode: String },
    StartRentalSuccess { item: Item },
    StartRentalFail { error: String },
    AddToRentals { barcode: String },
    AddToRentalsSuccess { item: Item },
    AddToRentalsFail { message: String },
    RemoveFromRentals { barcode: String },
    /// Checklist assembled; move on to the details/confirmation step.
    Review,
    Rent { details: RentalDetails },
    RentSuccess,
    RentFail { error: String },
    Return { returned_date: NaiveDate },
    ReturnSuccess,
    ReturnFail { error: String },
}

/// Modal loading message shown during API round-trips.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutAction {
    ShowLoadingMessage { message: String },
    HideLoadingMessage,
}

/// Cross-cutting actions consumed by the outer shell: user notifications
/// and navigation. No reducer handles these.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    ShowMessage { message: String },
    PushPage { screen: Screen },
    PopNav,
    PopNavToRoot,
}

/// All possible actions in the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Brands(BrandsAction),
    Models(ModelsAction),
    Categories(CategoriesAction),
    Items(ItemsAction),
    KitModels(KitModelsAction),
    Rentals(RentalsAction),
    Layout(LayoutAction),
    App(AppAction),
}

impl Action {
    /// Short dotted label for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Brands(a) => match a {
                BrandsAction::Fetch => "brands.fetch",
                BrandsAction::FetchSuccess { .. } => "brands.fetch_success",
                BrandsAction::FetchFail { .. } => "brands.fetch_fail",
                BrandsAction::Filter { .. } => "brands.filter",
                BrandsAction::Create { .. } => "brands.create",
                BrandsAction::CreateSuccess { .. } => "brands.create_success",
                BrandsAction::CreateFail { .. } => "brands.create_fail",
            },
            Action::Models(a) => match a {
                ModelsAction::Fetch => "models.fetch",
                ModelsAction::FetchSuccess { .. } => "models.fetch_success",
                ModelsAction::FetchFail { .. } => "models.fetch_fail",
                ModelsAction::Filter { .. } => "models.filter",
                ModelsAction::Create { .. } => "models.create",
                ModelsAction::CreateSuccess { .. } => "models.create_success",
                ModelsAction::CreateFail { .. } => "models.create_fail",
            },
            Action::Categories(a) => match a {
                CategoriesAction::Fetch => "categories.fetch",
                CategoriesAction::FetchSuccess { .. } => "categories.fetch_success",
                CategoriesAction::FetchFail { .. } => "categories.fetch_fail",
                CategoriesAction::Filter { .. } => "categories.filter",
                CategoriesAction::Create { .. } => "categories.create",
                CategoriesAction::CreateSuccess { .. } => "categories.create_success",
                CategoriesAction::CreateFail { .. } => "categories.create_fail",
            },
            Action::Items(a) => match a {
                ItemsAction::FetchItems { .. } => "items.fetch",
                ItemsAction::FetchItemsSuccess { .. } => "items.fetch_success",
                ItemsAction::FetchItemsFail { .. } => "items.fetch_fail",
                ItemsAction::CreateItem { .. } => "items.create",
                ItemsAction::CreateItemSuccess { .. } => "items.create_success",
                ItemsAction::CreateItemFail { .. } => "items.create_fail",
                ItemsAction::UpdateItem { .. } => "items.update",
                ItemsAction::UpdateItemSuccess { .. } => "items.update_success",
                ItemsAction::UpdateItemFail { .. } => "items.update_fail",
                ItemsAction::UpdateItemCustomFields(_) => "items.update_custom_fields",
                ItemsAction::DeleteItem { .. } => "items.delete",
                ItemsAction::DeleteItemSuccess { .. } => "items.delete_success",
                ItemsAction::DeleteItemFail { .. } => "items.delete_fail",
                ItemsAction::FetchItemCustomFields { .. } => "items.fetch_custom_fields",
                ItemsAction::FetchItemCustomFieldsSuccess { .. } => {
                    "items.fetch_custom_fields_success"
                }
                ItemsAction::FetchItemCustomFieldsFail { .. } => "items.fetch_custom_fields_fail",
                ItemsAction::FetchCustomFieldsByCategory { .. } => {
                    "items.fetch_custom_fields_by_category"
                }
                ItemsAction::FetchCustomFieldsByCategorySuccess { .. } => {
                    "items.fetch_custom_fields_by_category_success"
                }
                ItemsAction::FetchCustomFieldsByCategoryFail { .. } => {
                    "items.fetch_custom_fields_by_category_fail"
                }
                ItemsAction::CreateItems { .. } => "items.create_batch",
                ItemsAction::CreateItemsSuccess { .. } => "items.create_batch_success",
                ItemsAction::CreateItemsFail { .. } => "items.create_batch_fail",
            },
            Action::KitModels(a) => match a {
                KitModelsAction::Fetch { .. } => "kit_models.fetch",
                KitModelsAction::FetchSuccess { .. } => "kit_models.fetch_success",
                KitModelsAction::FetchFail { .. } => "kit_models.fetch_fail",
                KitModelsAction::CreateTemp { .. } => "kit_models.create_temp",
                KitModelsAction::UpdateTemp { .. } => "kit_models.update_temp",
                KitModelsAction::DeleteTemp { .. } => "kit_models.delete_temp",
                KitModelsAction::ResetTemp => "kit_models.reset_temp",
            },
            Action::Rentals(a) => match a {
                RentalsAction::StartRental { .. } => "rentals.start",
                RentalsAction::StartRentalSuccess { .. } => "rentals.start_success",
                RentalsAction::StartRentalFail { .. } => "rentals.start_fail",
                RentalsAction::AddToRentals { .. } => "rentals.add",
                RentalsAction::AddToRentalsSuccess { .. } => "rentals.add_success",
                RentalsAction::AddToRentalsFail { .. } => "rentals.add_fail",
                RentalsAction::RemoveFromRentals { .. } => "rentals.remove",
                RentalsAction::Review => "rentals.review",
                RentalsAction::Rent { .. } => "rentals.rent",
                RentalsAction::RentSuccess => "rentals.rent_success",
                RentalsAction::RentFail { .. } => "rentals.rent_fail",
                RentalsAction::Return { .. } => "rentals.return",
                RentalsAction::ReturnSuccess => "rentals.return_success",
                RentalsAction::ReturnFail { .. } => "rentals.return_fail",
            },
            Action::Layout(a) => match a {
                LayoutAction::ShowLoadingMessage { .. } => "layout.show_loading_message",
                LayoutAction::HideLoadingMessage => "layout.hide_loading_message",
            },
            Action::App(a) => match a {
                AppAction::ShowMessage { .. } => "app.show_message",
                AppAction::PushPage { .. } => "app.push_page",
                AppAction::PopNav => "app.pop_nav",
                AppAction::PopNavToRoot => "app.pop_nav_to_root",
            },
        }
    }
}

impl From<BrandsAction> for Action {
    fn from(action: BrandsAction) -> Self {
        Action::Brands(action)
    }
}

impl From<ModelsAction> for Action {
    fn from(action: ModelsAction) -> Self {
        Action::Models(action)
    }
}

impl From<CategoriesAction> for Action {
    fn from(action: CategoriesAction) -> Self {
        Action::Categories(action)
    }
}

impl From<ItemsAction> for Action {
    fn from(action: ItemsAction) -> Self {
        Action::Items(action)
    }
}

impl From<KitModelsAction> for Action {
    fn from(action: KitModelsAction) -> Self {
        Action::KitModels(action)
    }
}

impl From<RentalsAction> for Action {
    fn from(action: RentalsAction) -> Self {
        Action::Rentals(action)
    }
}

impl From<LayoutAction> for Action {
    fn from(action: LayoutAction) -> Self {
        Action::Layout(action)
    }
}

impl From<AppAction> for Action {
    fn from(action: AppAction) -> Self {
        Action::App(action)
    }
}

/// Value-less custom field entries for a category's definitions.
pub fn blank_custom_fields(definitions: Vec<CustomField>) -> Vec<ItemCustomField> {
    definitions.into_iter().map(ItemCustomField::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockpile_api::test_utils::{test_custom_field, test_item};

    #[test]
    fn test_chain_for_create_targets_create_actions() {
        let chain = CustomFieldsChain::for_create(test_item("9000001"), vec![]);

        let success = (chain.on_success)(test_item("9000001"));
        assert!(matches!(
            success,
            Action::Items(ItemsAction::CreateItemSuccess { .. })
        ));

        let fail = (chain.on_fail)("boom".to_string());
        assert!(matches!(
            fail,
            Action::Items(ItemsAction::CreateItemFail { .. })
        ));
    }

    #[test]
    fn test_chain_for_update_targets_update_actions() {
        let chain = CustomFieldsChain::for_update(test_item("9000001"), vec![]);

        let success = (chain.on_success)(test_item("9000001"));
        assert!(matches!(
            success,
            Action::Items(ItemsAction::UpdateItemSuccess { .. })
        ));
    }

    #[test]
    fn test_blank_custom_fields_drop_values() {
        let fields = blank_custom_fields(vec![
            test_custom_field(7, 1, "Color"),
            test_custom_field(8, 1, "Frets"),
        ]);

        assert_eq!(fields.len(), 2);
        assert!(fields.iter().all(|f| f.value.is_none()));
        assert_eq!(fields[0].name, "Color");
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(Action::from(BrandsAction::Fetch).label(), "brands.fetch");
        assert_eq!(
            Action::from(RentalsAction::ReturnSuccess).label(),
            "rentals.return_success"
        );
        assert_eq!(Action::from(AppAction::PopNav).label(), "app.pop_nav");
    }
}
