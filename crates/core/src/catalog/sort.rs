//! Sort keys for the shop listing.

use core::fmt;
use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Product;

/// Listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Newest first.
    #[default]
    Latest,
    /// Cheapest first.
    PriceLowHigh,
    /// Most expensive first.
    PriceHighLow,
}

impl SortKey {
    /// All keys, in the order a sort dropdown lists them.
    pub const ALL: [Self; 3] = [Self::Latest, Self::PriceLowHigh, Self::PriceHighLow];

    /// Wire/query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::PriceLowHigh => "price-low-high",
            Self::PriceHighLow => "price-high-low",
        }
    }

    /// Compare two products under this key.
    ///
    /// Unpriced products compare below every priced one; they are normally
    /// filtered out before sorting.
    #[must_use]
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Latest => b.created_at.cmp(&a.created_at),
            Self::PriceLowHigh => a.price.cmp(&b.price),
            Self::PriceHighLow => b.price.cmp(&a.price),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`SortKey`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0} (expected latest, price-low-high or price-high-low)")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

/// Sort products in place. Stable: equal keys keep their relative order.
pub fn sort_by(products: &mut [&Product], key: SortKey) {
    products.sort_by(|a, b| key.compare(a, b));
}
