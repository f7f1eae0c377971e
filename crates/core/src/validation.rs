//! Local validation failures.
//!
//! These are caught before any network call and are always safe to show to
//! the user verbatim.

use thiserror::Error;

/// A local validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The product offers colours but none was picked.
    #[error("Please select a color for {product}")]
    MissingColor { product: String },

    /// The picked size is not offered by the product.
    #[error("{product} is not available in size {size}")]
    UnknownSize { product: String, size: String },

    /// The picked colour is not offered by the product.
    #[error("{product} is not available in color {color}")]
    UnknownColor { product: String, color: String },

    /// Add-to-cart with a quantity of zero.
    #[error("Quantity must be at least 1")]
    ZeroQuantity,

    /// Quantity update below zero.
    #[error("Quantity cannot be negative")]
    NegativeQuantity,

    /// Quantity does not fit the supported range.
    #[error("Quantity {0} is too large")]
    QuantityTooLarge(i64),

    /// Blank search term.
    #[error("Please enter a search term")]
    EmptySearch,

    /// A required form field is blank.
    #[error("The {0} field is required")]
    BlankField(&'static str),

    /// Malformed email address.
    #[error("Please enter a valid email address ({0})")]
    InvalidEmail(String),

    /// A blank identifier was supplied.
    #[error("A {0} ID is required")]
    MissingId(&'static str),
}

/// Validate a requested cart quantity update.
///
/// Zero is allowed: the backend treats it as removal.
///
/// # Errors
///
/// Returns [`ValidationError::NegativeQuantity`] for negative input and
/// [`ValidationError::QuantityTooLarge`] if it does not fit a `u32`.
pub fn quantity_update(requested: i64) -> Result<u32, ValidationError> {
    if requested < 0 {
        return Err(ValidationError::NegativeQuantity);
    }
    u32::try_from(requested).map_err(|_| ValidationError::QuantityTooLarge(requested))
}

/// Validate a free-text search term, returning it trimmed.
///
/// # Errors
///
/// Returns [`ValidationError::EmptySearch`] for blank input.
pub fn search_term(term: &str) -> Result<String, ValidationError> {
    let term = term.trim();
    if term.is_empty() {
        return Err(ValidationError::EmptySearch);
    }
    Ok(term.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_update() {
        assert_eq!(quantity_update(0), Ok(0));
        assert_eq!(quantity_update(3), Ok(3));
        assert_eq!(quantity_update(-1), Err(ValidationError::NegativeQuantity));
        assert_eq!(
            quantity_update(i64::MAX),
            Err(ValidationError::QuantityTooLarge(i64::MAX))
        );
    }

    #[test]
    fn test_search_term() {
        assert_eq!(search_term("  kurta "), Ok("kurta".to_string()));
        assert_eq!(search_term("   "), Err(ValidationError::EmptySearch));
    }

    #[test]
    fn test_messages_are_user_facing() {
        let err = ValidationError::MissingColor {
            product: "Linen Shirt".to_string(),
        };
        assert_eq!(err.to_string(), "Please select a color for Linen Shirt");
    }
}
