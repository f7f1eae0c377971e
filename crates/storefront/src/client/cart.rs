//! `/cart` endpoints.

use loomi_core::{Cart, CartItemId, CartSelection};
use reqwest::Method;
use tracing::{info, instrument};

use super::ApiClient;
use super::wire::{CartResponse, QuantityUpdate};
use crate::error::ApiError;
use crate::session::AuthToken;

impl ApiClient {
    /// Fetch the signed-in user's cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, token))]
    pub async fn get_cart(&self, token: &AuthToken) -> Result<Cart, ApiError> {
        let request = self.request(Method::GET, &["cart"], Some(token))?;
        let response: CartResponse = self.execute(request).await?;
        response.into_cart("Failed to fetch cart.")
    }

    /// Add a resolved selection to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, token, selection), fields(product_id = %selection.product_id))]
    pub async fn add_to_cart(
        &self,
        token: &AuthToken,
        selection: &CartSelection,
    ) -> Result<Cart, ApiError> {
        let request = self
            .request(Method::POST, &["cart"], Some(token))?
            .json(selection);
        let response: CartResponse = self.execute(request).await?;
        let cart = response.into_cart("Failed to add item to cart.")?;
        info!(quantity = selection.quantity, "Added to cart");
        Ok(cart)
    }

    /// Set a cart line's quantity. Zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, token), fields(item_id = %item_id))]
    pub async fn update_cart_item(
        &self,
        token: &AuthToken,
        item_id: &CartItemId,
        quantity: u32,
    ) -> Result<Cart, ApiError> {
        let request = self
            .request(Method::PUT, &["cart", item_id.as_str()], Some(token))?
            .json(&QuantityUpdate { quantity });
        let response: CartResponse = self.execute(request).await?;
        response.into_cart("Failed to update quantity.")
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, token), fields(item_id = %item_id))]
    pub async fn remove_cart_item(
        &self,
        token: &AuthToken,
        item_id: &CartItemId,
    ) -> Result<Cart, ApiError> {
        let request = self.request(Method::DELETE, &["cart", item_id.as_str()], Some(token))?;
        let response: CartResponse = self.execute(request).await?;
        response.into_cart("Failed to remove item from cart.")
    }

    /// Empty the cart. The returned cart is always empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, token))]
    pub async fn clear_cart(&self, token: &AuthToken) -> Result<Cart, ApiError> {
        let request = self.request(Method::DELETE, &["cart"], Some(token))?;
        let response: CartResponse = self.execute(request).await?;
        response.into_cart("Failed to clear cart.")?;
        info!("Cart cleared");
        Ok(Cart::empty())
    }
}
