//! # stockpile-core - Core Domain Types
//!
//! Foundation crate for the Stockpile client. Provides the domain entities,
//! error handling, logging setup, user-facing message text, and the device
//! collaborator traits.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Item`] - Inventory item, keyed by barcode
//! - [`Brand`], [`Model`], [`Category`] - Catalog entities ({id, name})
//! - [`KitModel`] - Provisional batch-item entry (brand, model, quantity)
//! - [`Rental`] - Rental record; active while `returned_date` is unset
//! - [`CustomField`], [`ItemCustomField`] - Category-scoped field values
//! - [`User`], [`Credentials`], [`LoginResponse`] - Auth types
//! - [`CatalogEntity`] - id/name access shared by the catalog entities
//! - [`RentalKind`] - Rent vs. return, fixed when a checklist starts
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum with a `user_message()` for notifications
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Messages (`messages`)
//! - Notification and loading-message text shared by effects and screens
//!
//! ### Device Collaborators (`device`)
//! - [`Notify`] - Toast/notification surface, [`LogNotifier`] fallback
//! - [`BarcodeScanner`] - Scanner returning a [`Scan`] or a cancellation
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use stockpile_core::prelude::*;
//! ```

pub mod device;
pub mod error;
pub mod logging;
pub mod messages;
pub mod types;

/// Prelude for common imports used throughout all Stockpile crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use device::{BarcodeScanner, LogNotifier, Notify, Scan};
pub use error::{Error, Result, ResultExt};
pub use types::{
    Brand, BrandId, CatalogEntity, Category, CategoryId, Credentials, CustomField, CustomFieldId,
    Item, ItemCustomField, ItemFilter, KitId, KitModel, LoginResponse, Model, ModelId, Rental,
    RentalDetails, RentalId, RentalKind, ResultList, User, UserId,
};
