//! Status enums for orders and payments.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Order fulfilment status.
///
/// The backend sends a free-form string; the four known values form a linear
/// delivery progression. Anything else is kept verbatim as [`OrderStatus::Other`]
/// and has no position on the progression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Ordered,
    Shipped,
    OutForDelivery,
    Delivered,
    Other(String),
}

impl OrderStatus {
    /// Known statuses in delivery order.
    pub const STEPS: [Self; 4] = [
        Self::Ordered,
        Self::Shipped,
        Self::OutForDelivery,
        Self::Delivered,
    ];

    /// Display label, matching the backend wire value.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Ordered => "Ordered",
            Self::Shipped => "Shipped",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
            Self::Other(s) => s,
        }
    }

    /// Zero-based position on the delivery progression.
    #[must_use]
    pub fn step_index(&self) -> Option<usize> {
        Self::STEPS.iter().position(|step| step == self)
    }

    /// Whether the progression step at `idx` has been reached.
    ///
    /// Unknown statuses reach no step.
    #[must_use]
    pub fn reached(&self, idx: usize) -> bool {
        self.step_index().is_some_and(|current| idx <= current)
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Ordered" => Self::Ordered,
            "Shipped" => Self::Shipped,
            "Out for Delivery" => Self::OutForDelivery,
            "Delivered" => Self::Delivered,
            _ => Self::Other(s),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(s) => s,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How an order is being paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Paid through the payment gateway; needs backend confirmation.
    #[serde(rename = "Online Payment")]
    Online,
    /// Cash on delivery.
    #[default]
    #[serde(rename = "Cash on Delivery")]
    CashOnDelivery,
}

impl PaymentMethod {
    /// Display label, as the backend spells it.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Online => "Online Payment",
            Self::CashOnDelivery => "Cash on Delivery",
        }
    }

    /// Whether completing checkout requires a payment confirmation call.
    #[must_use]
    pub const fn needs_confirmation(self) -> bool {
        matches!(self, Self::Online)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error parsing a [`PaymentMethod`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" | "online payment" => Ok(Self::Online),
            "cod" | "cash" | "cash on delivery" => Ok(Self::CashOnDelivery),
            _ => Err(UnknownPaymentMethod(s.to_string())),
        }
    }
}
