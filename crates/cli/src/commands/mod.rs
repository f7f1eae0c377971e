//! Command implementations.
//!
//! Each command talks to the backend through the storefront stores and
//! writes its result to the given writer.

use loomi_core::ValidationError;
use loomi_storefront::config::ConfigError;
use loomi_storefront::{ApiClient, ApiError, StorefrontConfig};
use thiserror::Error;

pub mod cart;
pub mod checkout;
pub mod contact;
pub mod orders;
pub mod shop;
pub mod wishlist;

/// Shared state for a single command run.
pub struct Context {
    pub config: StorefrontConfig,
    pub client: ApiClient,
}

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A storefront operation failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Input rejected before reaching the backend.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No product with this ID in the catalog.
    #[error("No product with ID {0}")]
    UnknownProduct(String),

    /// Requested listing page does not exist.
    #[error("Page {page} does not exist (there are {total} pages)")]
    PageOutOfRange { page: usize, total: usize },

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl CommandError {
    /// Message shown to the user.
    pub fn notice(&self) -> String {
        match self {
            Self::Api(e) => e.notice(),
            other => other.to_string(),
        }
    }

    /// Forward storefront errors to Sentry reporting.
    pub fn report(&self) {
        if let Self::Api(e) = self {
            e.report();
        }
    }
}
