//! Order history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::OrderId;
use super::price::{self, Price};
use super::product::ProductSummary;
use super::status::OrderStatus;

/// A line of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Ordered product, absent when it has since been deleted.
    #[serde(default)]
    pub product: Option<ProductSummary>,
    /// Quantity ordered.
    pub quantity: u32,
}

/// A placed order as listed under "my orders".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default = "zero", deserialize_with = "price::deserialize_amount")]
    pub total_amount: Price,
    /// Missing or null statuses read as `Ordered`.
    #[serde(default, deserialize_with = "status_or_default")]
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

const fn zero() -> Price {
    Price::ZERO
}

fn status_or_default<'de, D>(deserializer: D) -> Result<OrderStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| !s.is_empty())
        .map(OrderStatus::from)
        .unwrap_or_default())
}

impl Order {
    /// Payment badge text.
    #[must_use]
    pub const fn payment_label(&self) -> &'static str {
        if self.is_paid {
            "Payment Completed"
        } else {
            "Pending Payment"
        }
    }
}
