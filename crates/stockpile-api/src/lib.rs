//! # stockpile-api - Remote API Client
//!
//! HTTP client for the Stockpile REST/HAL service: endpoint resolution via
//! the HAL root document, bearer-token auth with device-local token
//! storage, and typed CRUD operations per entity.
//!
//! Depends on [`stockpile_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Endpoint Resolution (`hal`)
//! - [`HalDocument`] - Parsed API root document (`_links` only)
//!
//! ### Token Storage (`token`)
//! - [`TokenStore`] - Device-local storage holding the `id_token`
//! - [`FileTokenStore`] - File-backed store under the config directory
//! - [`MemoryTokenStore`] - In-memory store for tests
//!
//! ### HTTP Client (`client`)
//! - [`ApiClient`] - reqwest wrapper: HAL link resolution, bearer header,
//!   error mapping (`{"message": ...}` bodies become [`Error::Api`])
//!
//! ### Inventory Operations (`inventory`)
//! - [`InventoryApi`] - The external collaborator trait the state layer
//!   is written against
//! - [`HttpInventoryApi`] - Implementation over [`ApiClient`]
//!
//! ### Auth (`auth`)
//! - [`UserClient`] - login/logout/is_logged_in, account updates
//!
//! [`Error::Api`]: stockpile_core::Error::Api

pub mod auth;
pub mod client;
pub mod hal;
pub mod inventory;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;
pub mod token;

// Public API re-exports
pub use auth::UserClient;
pub use client::ApiClient;
pub use hal::HalDocument;
pub use inventory::{HttpInventoryApi, InventoryApi, LocalInventoryApi};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};
