//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are currency-agnostic decimals. The backend is loose about the wire
//! shape (numbers, numeric strings, occasionally garbage), so [`Price`]
//! provides a lenient deserializer that maps anything non-numeric to "unpriced"
//! instead of failing the whole record. Unpriced products never pass the price
//! filter.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A decimal price amount.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of units.
    #[must_use]
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Parse a price from text, accepting plain and scientific notation.
    ///
    /// Returns `None` for blank or non-numeric input.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .ok()
            .map(Self)
    }

    /// Format as Indian rupees with lakh/crore digit grouping, e.g. `₹1,23,456.50`.
    #[must_use]
    pub fn display_inr(&self) -> String {
        let rounded = self.0.round_dp(2);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let text = format!("{:.2}", rounded.abs());
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        let grouped = group_indian(whole);
        let sign = if negative { "-" } else { "" };
        format!("{sign}₹{grouped}.{fraction}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

/// Group digits the Indian way: last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// Format an optional price, rendering unpriced values as `N/A`.
#[must_use]
pub fn display_optional(price: Option<Price>) -> String {
    price.map_or_else(|| "N/A".to_string(), |p| p.display_inr())
}

/// Deserialize a price that may be a number, a numeric string, or junk.
///
/// The field itself is still required: a missing key is an error, while a
/// present-but-non-numeric value becomes `None`.
///
/// # Errors
///
/// Only fails if the underlying deserializer fails to produce a JSON value.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Price>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Number(n) => Price::parse_lenient(&n.to_string()),
        serde_json::Value::String(s) => Price::parse_lenient(&s),
        _ => None,
    })
}

/// Deserialize a monetary total, treating missing or non-numeric values as zero.
///
/// # Errors
///
/// Only fails if the underlying deserializer fails to produce a JSON value.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Price, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_lenient(deserializer)?.unwrap_or(Price::ZERO))
}

/// Inclusive price bounds used by the catalog filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lower bound (inclusive).
    pub min: Decimal,
    /// Upper bound (inclusive).
    pub max: Decimal,
}

impl PriceRange {
    /// Default lower bound of the shop price filter.
    pub const DEFAULT_MIN: Decimal = Decimal::ZERO;
    /// Default upper bound of the shop price filter.
    pub const DEFAULT_MAX: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

    /// Create a new range.
    #[must_use]
    pub const fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// Whether `price` lies within the bounds, inclusive on both ends.
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        price.amount() >= self.min && price.amount() <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN, Self::DEFAULT_MAX)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(deserialize_with = "deserialize_lenient")]
        price: Option<Price>,
    }

    fn lenient(json: &str) -> Option<Price> {
        serde_json::from_str::<Wrapper>(json).unwrap().price
    }

    #[test]
    fn test_lenient_accepts_numbers_and_numeric_strings() {
        assert_eq!(lenient(r#"{"price": 10}"#), Some(Price::from_units(10)));
        assert_eq!(lenient(r#"{"price": 19.5}"#), Some(Price::new(d("19.5"))));
        assert_eq!(lenient(r#"{"price": " 42.00 "}"#), Some(Price::new(d("42.00"))));
    }

    #[test]
    fn test_lenient_maps_junk_to_none() {
        assert_eq!(lenient(r#"{"price": "TBD"}"#), None);
        assert_eq!(lenient(r#"{"price": ""}"#), None);
        assert_eq!(lenient(r#"{"price": null}"#), None);
        assert_eq!(lenient(r#"{"price": [1]}"#), None);
    }

    #[test]
    fn test_lenient_field_is_still_required() {
        assert!(serde_json::from_str::<Wrapper>("{}").is_err());
    }

    #[test]
    fn test_display_inr_grouping() {
        assert_eq!(Price::from_units(0).display_inr(), "₹0.00");
        assert_eq!(Price::from_units(999).display_inr(), "₹999.00");
        assert_eq!(Price::from_units(1_234).display_inr(), "₹1,234.00");
        assert_eq!(Price::new(d("123456.5")).display_inr(), "₹1,23,456.50");
        assert_eq!(Price::from_units(12_345_678).display_inr(), "₹1,23,45,678.00");
    }

    #[test]
    fn test_display_optional() {
        assert_eq!(display_optional(None), "N/A");
        assert_eq!(display_optional(Some(Price::from_units(5))), "₹5.00");
    }

    #[test]
    fn test_price_range_inclusive() {
        let range = PriceRange::new(d("15"), d("25"));
        assert!(range.contains(Price::from_units(15)));
        assert!(range.contains(Price::from_units(25)));
        assert!(!range.contains(Price::new(d("25.01"))));
        assert!(!range.contains(Price::from_units(10)));
    }

    #[test]
    fn test_default_range() {
        let range = PriceRange::default();
        assert_eq!(range.min, Decimal::ZERO);
        assert_eq!(range.max, Decimal::from(100_000));
    }
}
