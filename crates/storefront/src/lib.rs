//! Loomi Storefront - REST client and client-side state.
//!
//! The backend owns every persistent collection. This crate talks to it and
//! keeps thin local mirrors:
//!
//! - [`client`] - `ApiClient`, one method per backend endpoint
//! - [`store`] - Catalog, cart and wishlist stores plus checkout completion
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Error taxonomy and Sentry reporting
//! - [`session`] - Bearer token handling
//!
//! # Example
//!
//! ```rust,ignore
//! use loomi_storefront::{ApiClient, StorefrontConfig};
//! use loomi_storefront::store::{CartStore, CatalogStore};
//!
//! let config = StorefrontConfig::from_env()?;
//! let client = ApiClient::new(&config)?;
//!
//! let mut catalog = CatalogStore::new();
//! catalog.load(&client).await?;
//!
//! let mut cart = CartStore::new(client.clone(), config.auth_token.clone());
//! cart.refresh().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod store;

pub use client::ApiClient;
pub use config::StorefrontConfig;
pub use error::{ApiError, ErrorKind};
pub use session::AuthToken;
