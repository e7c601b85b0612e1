//! Item form: draft assembly and client-side validation
//!
//! The add-item and edit-item screens hold an [`ItemForm`]. It owns the
//! draft's parts, keeps the brand/model dependency consistent, and turns a
//! save into the loading + CRUD action pair the store expects. Validation
//! failures return field errors and dispatch nothing; effects rely on
//! payloads being shape-valid by the time they see them.

use stockpile_core::messages;
use stockpile_core::types::{Brand, Category, CustomFieldId, Item, ItemCustomField, Model};

use crate::action::{Action, ItemsAction, LayoutAction};

/// Per-field validation errors, surfaced inline on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub brand: Option<&'static str>,
    pub model: Option<&'static str>,
    pub category: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.brand.is_none() && self.model.is_none() && self.category.is_none()
    }
}

/// Draft state behind the add-item and edit-item screens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemForm {
    barcode: String,
    brand: Option<Brand>,
    model: Option<Model>,
    category: Option<Category>,
    fields: Vec<ItemCustomField>,
    /// Set when editing: the barcode the server knows the item by.
    existing: Option<Item>,
}

impl ItemForm {
    /// Blank form for the add-item screen.
    pub fn add() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing item and its stored field values.
    pub fn edit(item: Item, fields: Vec<ItemCustomField>) -> Self {
        Self {
            barcode: item.barcode.clone(),
            brand: Some(Brand {
                brand_id: item.brand_id,
                name: item.brand.clone(),
            }),
            model: Some(Model {
                model_id: item.model_id,
                brand_id: item.brand_id,
                name: item.model.clone(),
            }),
            category: Some(Category {
                category_id: item.category_id,
                name: item.category.clone(),
            }),
            fields,
            existing: Some(item),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.existing.is_some()
    }

    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    pub fn brand(&self) -> Option<&Brand> {
        self.brand.as_ref()
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn custom_fields(&self) -> &[ItemCustomField] {
        &self.fields
    }

    /// Set the barcode of a new item. The barcode is the server-side
    /// identity, so on an existing item this is a no-op.
    pub fn set_barcode(&mut self, barcode: impl Into<String>) {
        if self.existing.is_none() {
            self.barcode = barcode.into();
        }
    }

    /// Pick a brand. Switching to a different brand clears the model,
    /// since models belong to exactly one brand.
    pub fn set_brand(&mut self, brand: Brand) {
        if self.model.as_ref().is_some_and(|m| m.brand_id != brand.brand_id) {
            self.model = None;
        }
        self.brand = Some(brand);
    }

    /// Pick a model. The screen offers only models of the selected brand
    /// (`selectors::models_for_brand`), so no cross-brand check is made.
    pub fn set_model(&mut self, model: Model) {
        self.model = Some(model);
    }

    /// Pick a category. Switching category invalidates the field values;
    /// the returned action fetches the new category's definitions and
    /// should be dispatched by the caller.
    pub fn set_category(&mut self, category: Category) -> Option<Action> {
        let changed = self
            .category
            .as_ref()
            .map_or(true, |c| c.category_id != category.category_id);
        let category_id = category.category_id;
        self.category = Some(category);
        if changed {
            self.fields.clear();
            Some(Action::Items(ItemsAction::FetchCustomFieldsByCategory {
                category_id,
            }))
        } else {
            None
        }
    }

    /// Install the fetched field definitions (or stored values, on edit).
    pub fn set_custom_fields(&mut self, fields: Vec<ItemCustomField>) {
        self.fields = fields;
    }

    /// Write one field's value. Unknown ids are ignored.
    pub fn set_custom_field_value(&mut self, field_id: CustomFieldId, value: Option<String>) {
        if let Some(field) = self
            .fields
            .iter_mut()
            .find(|f| f.custom_field_id == field_id)
        {
            field.value = value;
        }
    }

    /// Check the required pickers. An empty result means the form can be
    /// saved.
    pub fn validate(&self) -> FieldErrors {
        FieldErrors {
            brand: self.brand.is_none().then_some(messages::BRAND_REQUIRED),
            model: self.model.is_none().then_some(messages::MODEL_REQUIRED),
            category: self
                .category
                .is_none()
                .then_some(messages::CATEGORY_REQUIRED),
        }
    }

    /// The actions a valid save dispatches: the loading message and the
    /// create or update carrying the assembled item. Field errors abort
    /// with nothing dispatched.
    pub fn save(&self) -> Result<Vec<Action>, FieldErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        let item = self.assemble();

        let (message, action) = if self.is_edit() {
            (
                messages::UPDATING_ITEM,
                ItemsAction::UpdateItem {
                    item,
                    fields: self.fields.clone(),
                },
            )
        } else {
            (
                messages::CREATING_ITEM,
                ItemsAction::CreateItem {
                    item,
                    fields: self.fields.clone(),
                },
            )
        };

        Ok(vec![
            Action::Layout(LayoutAction::ShowLoadingMessage {
                message: message.to_string(),
            }),
            Action::Items(action),
        ])
    }

    /// The actions a delete dispatches. `None` when the item has never
    /// been saved.
    pub fn delete(&self) -> Option<Vec<Action>> {
        let existing = self.existing.as_ref()?;
        Some(vec![
            Action::Layout(LayoutAction::ShowLoadingMessage {
                message: messages::DELETING_ITEM.to_string(),
            }),
            Action::Items(ItemsAction::DeleteItem {
                barcode: existing.barcode.clone(),
            }),
        ])
    }

    fn assemble(&self) -> Item {
        // validate() has run by the time this is called.
        let brand = self.brand.as_ref().expect("brand validated");
        let model = self.model.as_ref().expect("model validated");
        let category = self.category.as_ref().expect("category validated");
        Item {
            barcode: self.barcode.trim().to_string(),
            brand_id: brand.brand_id,
            brand: brand.name.clone(),
            model_id: model.model_id,
            model: model.name.clone(),
            category_id: category.category_id,
            category: category.name.clone(),
            available: self.existing.as_ref().map_or(true, |item| item.available),
        }
    }
}
