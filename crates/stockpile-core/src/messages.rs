//! User-facing message text
//!
//! Shared by effects (notification actions) and screens (loading
//! messages) so the wording stays consistent across flows.

// ─────────────────────────────────────────────────────────────────
// Notifications
// ─────────────────────────────────────────────────────────────────

pub const ITEM_EDITED: &str = "Item successfully edited";
pub const ITEM_DELETED: &str = "Item successfully deleted";
pub const ITEMS_ADDED: &str = "Items successfully added";
pub const ITEMS_RENTED: &str = "Items successfully rented";
pub const ITEMS_RETURNED: &str = "Items successfully returned";

pub const ITEM_ALREADY_RENTED: &str = "Item is already rented";
pub const ITEM_NOT_RENTED: &str = "Item is not rented";
pub const ITEM_ALREADY_ADDED: &str = "Item has already been added";

pub const USER_EDITED: &str = "Account successfully updated";
pub const PASSWORD_CHANGED: &str = "Password successfully changed";

// ─────────────────────────────────────────────────────────────────
// Form Validation
// ─────────────────────────────────────────────────────────────────

pub const BRAND_REQUIRED: &str = "Brand is required";
pub const MODEL_REQUIRED: &str = "Model is required";
pub const CATEGORY_REQUIRED: &str = "Category is required";

// ─────────────────────────────────────────────────────────────────
// Loading Messages
// ─────────────────────────────────────────────────────────────────

pub const CREATING_ITEM: &str = "Creating item...";
pub const UPDATING_ITEM: &str = "Updating item...";
pub const DELETING_ITEM: &str = "Deleting item...";
pub const FETCHING_ITEM: &str = "Fetching item...";
pub const CREATING_ITEMS: &str = "Creating items...";
pub const RENTING_ITEMS: &str = "Renting items...";
pub const RETURNING_ITEMS: &str = "Returning items...";
