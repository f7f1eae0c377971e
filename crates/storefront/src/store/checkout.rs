//! Post-order completion: confirm online payments, then clear the cart.

use loomi_core::{OrderId, PaymentMethod};
use tracing::{info, instrument, warn};

use super::cart::CartStore;
use crate::error::ApiError;

/// Support notice shown when an online payment could not be confirmed.
const CONFIRMATION_FAILED: &str =
    "There was an issue confirming your payment. Please contact support.";

/// What happened to the payment confirmation step.
#[derive(Debug)]
pub enum PaymentOutcome {
    /// Cash on delivery needs no confirmation.
    NotRequired,
    /// The backend marked the order as paid.
    Confirmed(Option<String>),
    /// Confirmation failed; the order stays unpaid.
    Failed(ApiError),
}

/// Result of completing a checkout.
#[derive(Debug)]
pub struct CheckoutOutcome {
    pub order_id: OrderId,
    pub payment_method: PaymentMethod,
    pub payment: PaymentOutcome,
    /// Set when clearing the cart failed.
    pub cart_error: Option<ApiError>,
}

impl CheckoutOutcome {
    /// Whether every step succeeded.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        !matches!(self.payment, PaymentOutcome::Failed(_)) && self.cart_error.is_none()
    }

    /// User-facing notices for the steps that failed.
    #[must_use]
    pub fn notices(&self) -> Vec<String> {
        let mut notices = Vec::new();
        if matches!(self.payment, PaymentOutcome::Failed(_)) {
            notices.push(CONFIRMATION_FAILED.to_string());
        }
        if let Some(err) = &self.cart_error {
            notices.push(err.notice());
        }
        notices
    }
}

/// Finish an order: confirm the payment when it was made online, then clear
/// the cart whatever the payment method.
///
/// A failed confirmation is reported and recorded in the outcome but does
/// not stop the cart from being cleared.
///
/// # Errors
///
/// Returns [`ApiError::Unauthenticated`] when the cart store has no token;
/// nothing is sent in that case.
#[instrument(skip(cart), fields(order_id = %order_id))]
pub async fn complete_checkout(
    cart: &mut CartStore,
    order_id: &OrderId,
    payment_method: PaymentMethod,
) -> Result<CheckoutOutcome, ApiError> {
    let token = cart.token_for_checkout()?;

    let payment = if payment_method.needs_confirmation() {
        match cart.client().confirm_payment(&token, order_id).await {
            Ok(message) => PaymentOutcome::Confirmed(message),
            Err(e) => {
                warn!(error = %e, "Payment confirmation failed");
                e.report();
                PaymentOutcome::Failed(e)
            }
        }
    } else {
        PaymentOutcome::NotRequired
    };

    let cart_error = match cart.clear().await {
        Ok(_) => None,
        Err(e) => {
            e.report();
            Some(e)
        }
    };

    info!(
        payment_method = payment_method.label(),
        cart_cleared = cart_error.is_none(),
        "Checkout completed"
    );

    Ok(CheckoutOutcome {
        order_id: order_id.clone(),
        payment_method,
        payment,
        cart_error,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::AuthToken;
    use crate::store::test_support::offline_client;

    fn order() -> OrderId {
        OrderId::parse("order-1").unwrap()
    }

    #[tokio::test]
    async fn test_requires_token() {
        let mut cart = CartStore::new(offline_client(), None);
        let err = complete_checkout(&mut cart, &order(), PaymentMethod::Online)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_failures_are_collected_not_raised() {
        let token = AuthToken::new("t0ken").unwrap();
        let mut cart = CartStore::new(offline_client(), Some(token));
        let outcome = complete_checkout(&mut cart, &order(), PaymentMethod::Online)
            .await
            .unwrap();
        assert!(matches!(outcome.payment, PaymentOutcome::Failed(_)));
        assert!(outcome.cart_error.is_some());
        assert!(!outcome.is_complete());
        assert_eq!(outcome.notices().len(), 2);
        assert_eq!(outcome.notices()[0], CONFIRMATION_FAILED);
    }

    #[tokio::test]
    async fn test_cash_on_delivery_skips_confirmation() {
        let token = AuthToken::new("t0ken").unwrap();
        let mut cart = CartStore::new(offline_client(), Some(token));
        let outcome = complete_checkout(&mut cart, &order(), PaymentMethod::CashOnDelivery)
            .await
            .unwrap();
        assert!(matches!(outcome.payment, PaymentOutcome::NotRequired));
    }
}
