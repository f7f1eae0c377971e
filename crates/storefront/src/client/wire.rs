//! Request and response bodies exchanged with the backend.
//!
//! Envelopes are decoded here and unwrapped into core types; a
//! `success: false` envelope becomes [`ApiError::Rejected`].

use loomi_core::price::{self, Price};
use loomi_core::{Cart, CartItem, Order, ProductId, ProductSummary};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ApiError;

// =============================================================================
// Responses
// =============================================================================

/// `GET /product/get-product`. Records are decoded one by one.
#[derive(Debug, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<serde_json::Value>,
}

/// `GET /category/get-category`. Records are decoded one by one.
#[derive(Debug, Deserialize)]
pub struct CategoriesResponse {
    #[serde(default)]
    pub categories: Vec<serde_json::Value>,
}

/// Every `/cart` endpoint.
#[derive(Debug, Deserialize)]
pub struct CartResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default = "zero", deserialize_with = "price::deserialize_amount")]
    pub total: Price,
}

const fn zero() -> Price {
    Price::ZERO
}

impl CartResponse {
    /// Unwrap the envelope into the cart it carries.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the backend reported failure.
    pub fn into_cart(self, fallback: &str) -> Result<Cart, ApiError> {
        if !self.success {
            return Err(rejected(self.message, fallback));
        }
        Ok(Cart {
            items: self.items,
            total: self.total,
        })
    }
}

/// Every `/wishlist` endpoint.
#[derive(Debug, Deserialize)]
pub struct WishlistResponse {
    #[serde(default)]
    pub wishlist: Option<WishlistBody>,
}

#[derive(Debug, Deserialize)]
pub struct WishlistBody {
    #[serde(default)]
    pub products: Option<Vec<ProductSummary>>,
}

impl WishlistResponse {
    /// The wishlisted products; a missing list reads as empty.
    #[must_use]
    pub fn into_products(self) -> Vec<ProductSummary> {
        self.wishlist
            .and_then(|body| body.products)
            .unwrap_or_default()
    }
}

/// `GET /orders/my-orders`.
#[derive(Debug, Deserialize)]
pub struct OrdersResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl OrdersResponse {
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the backend reported failure.
    pub fn into_orders(self) -> Result<Vec<Order>, ApiError> {
        if self.success {
            Ok(self.orders)
        } else {
            Err(rejected(self.message, "Failed to get orders."))
        }
    }
}

/// `{ success, message }` acknowledgements.
#[derive(Debug, Deserialize)]
pub struct AckResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl AckResponse {
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the backend reported failure.
    pub fn into_message(self, fallback: &str) -> Result<Option<String>, ApiError> {
        if self.success {
            Ok(self.message)
        } else {
            Err(rejected(self.message, fallback))
        }
    }
}

/// `POST /contact` success body.
#[derive(Debug, Deserialize)]
pub struct ContactResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body shapes: `{ message }` or `{ error }`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Pull a human-readable message out of a non-success response body.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .message
        .or(parsed.error)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

fn rejected(message: Option<String>, fallback: &str) -> ApiError {
    ApiError::Rejected(
        message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string()),
    )
}

/// Decode records individually, dropping malformed ones with a warning.
pub fn decode_records<T: DeserializeOwned>(records: Vec<serde_json::Value>, kind: &str) -> Vec<T> {
    let total = records.len();
    let decoded: Vec<T> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(kind, index, error = %e, "Dropping malformed record");
                None
            }
        })
        .collect();
    if decoded.len() < total {
        warn!(kind, total, kept = decoded.len(), "Catalog response had malformed records");
    }
    decoded
}

// =============================================================================
// Requests
// =============================================================================

/// `PUT /cart/:id`.
#[derive(Debug, Serialize)]
pub struct QuantityUpdate {
    pub quantity: u32,
}

/// `POST /wishlist`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistAdd<'a> {
    pub product_id: &'a ProductId,
}

/// `POST /order/confirm-payment/:id`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub payment_status: &'static str,
}

impl PaymentConfirmation {
    pub const PAID: Self = Self {
        payment_status: "Paid",
    };
}
