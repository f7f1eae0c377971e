//! Order history and payment confirmation.

use loomi_core::{Order, OrderId};
use reqwest::Method;
use tracing::{info, instrument};

use super::ApiClient;
use super::wire::{AckResponse, OrdersResponse, PaymentConfirmation};
use crate::error::ApiError;
use crate::session::AuthToken;

impl ApiClient {
    /// List the signed-in user's orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, token))]
    pub async fn my_orders(&self, token: &AuthToken) -> Result<Vec<Order>, ApiError> {
        let request = self.request(Method::GET, &["orders", "my-orders"], Some(token))?;
        let response: OrdersResponse = self.execute(request).await?;
        response.into_orders()
    }

    /// Mark an online-paid order as paid.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, token), fields(order_id = %order_id))]
    pub async fn confirm_payment(
        &self,
        token: &AuthToken,
        order_id: &OrderId,
    ) -> Result<Option<String>, ApiError> {
        let request = self
            .request(
                Method::POST,
                &["order", "confirm-payment", order_id.as_str()],
                Some(token),
            )?
            .json(&PaymentConfirmation::PAID);
        let response: AckResponse = self.execute(request).await?;
        let message = response.into_message("Failed to confirm payment.")?;
        info!("Payment confirmed");
        Ok(message)
    }
}
