//! Cart records and variant selection.

use serde::{Deserialize, Serialize};

use super::id::{CartItemId, ProductId};
use super::price::{self, Price};
use super::product::{Product, ProductSummary};
use crate::validation::ValidationError;

/// Size label used when a product has no sizes.
pub const ONE_SIZE: &str = "One Size";

/// Colour label used when a product has no colours.
pub const DEFAULT_COLOR: &str = "Default Color";

/// A single cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Cart line identifier (not the product ID).
    #[serde(rename = "_id")]
    pub id: CartItemId,
    /// The product, absent when it was deleted server-side.
    #[serde(default)]
    pub product: Option<ProductSummary>,
    /// Quantity.
    pub quantity: u32,
    /// Chosen size.
    #[serde(default)]
    pub size: Option<String>,
    /// Chosen colour.
    #[serde(default)]
    pub color: Option<String>,
}

impl CartItem {
    /// Line total, `None` when the product or its price is missing.
    #[must_use]
    pub fn line_total(&self) -> Option<Price> {
        let unit = self.product.as_ref()?.price?;
        Some(Price::new(unit.amount() * rust_decimal::Decimal::from(self.quantity)))
    }
}

/// The server's view of a cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Cart lines.
    #[serde(default)]
    pub items: Vec<CartItem>,
    /// Cart total as computed by the server.
    #[serde(default = "zero", deserialize_with = "price::deserialize_amount")]
    pub total: Price,
}

const fn zero() -> Price {
    Price::ZERO
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Find a line by its ID.
    #[must_use]
    pub fn item(&self, id: &CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }
}

/// A resolved add-to-cart request: product, quantity and variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSelection {
    /// Product to add.
    pub product_id: ProductId,
    /// Quantity, at least 1.
    pub quantity: u32,
    /// Resolved size label.
    pub size: String,
    /// Resolved colour label.
    pub color: String,
}

impl CartSelection {
    /// Resolve the variant for an add-to-cart action.
    ///
    /// Size defaults to the product's first size, or [`ONE_SIZE`] if it has
    /// none. Colour must be picked explicitly when the product offers colours
    /// and defaults to [`DEFAULT_COLOR`] otherwise.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the quantity is zero, no colour was
    /// picked for a product that has colours, or the picked size/colour is not
    /// offered by the product.
    pub fn resolve(
        product: &Product,
        quantity: u32,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Result<Self, ValidationError> {
        if quantity == 0 {
            return Err(ValidationError::ZeroQuantity);
        }

        let size = match size.map(str::trim).filter(|s| !s.is_empty()) {
            Some(size) if product.sizes.is_empty() => size.to_string(),
            // Sent with the product's own spelling
            Some(size) => match product.size_label(size) {
                Some(label) => label.to_string(),
                None => {
                    return Err(ValidationError::UnknownSize {
                        product: product.name.clone(),
                        size: size.to_string(),
                    });
                }
            },
            None => product
                .sizes
                .first()
                .cloned()
                .unwrap_or_else(|| ONE_SIZE.to_string()),
        };

        let color = match color.map(str::trim).filter(|c| !c.is_empty()) {
            Some(color) if product.colors.is_empty() || product.offers_color(color) => {
                color.to_string()
            }
            Some(color) => {
                return Err(ValidationError::UnknownColor {
                    product: product.name.clone(),
                    color: color.to_string(),
                });
            }
            None if product.colors.is_empty() => DEFAULT_COLOR.to_string(),
            None => {
                return Err(ValidationError::MissingColor {
                    product: product.name.clone(),
                });
            }
        };

        Ok(Self {
            product_id: product.id.clone(),
            quantity,
            size,
            color,
        })
    }
}
