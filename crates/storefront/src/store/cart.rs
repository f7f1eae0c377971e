//! Cart store mirroring the server-held cart.

use loomi_core::validation::quantity_update;
use loomi_core::{Cart, CartItemId, CartSelection, Product};
use tracing::{instrument, warn};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::session::AuthToken;

/// The signed-in user's cart.
#[derive(Debug, Clone)]
pub struct CartStore {
    client: ApiClient,
    token: Option<AuthToken>,
    cart: Cart,
}

impl CartStore {
    /// An empty store. Call [`refresh`](Self::refresh) to load the cart.
    #[must_use]
    pub fn new(client: ApiClient, token: Option<AuthToken>) -> Self {
        Self {
            client,
            token,
            cart: Cart::empty(),
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    fn token(&self) -> Result<&AuthToken, ApiError> {
        self.token.as_ref().ok_or(ApiError::Unauthenticated)
    }

    pub(crate) const fn client(&self) -> &ApiClient {
        &self.client
    }

    pub(crate) fn token_for_checkout(&self) -> Result<AuthToken, ApiError> {
        self.token().cloned()
    }

    /// Reload the cart from the server.
    ///
    /// Without a token the cart is cleared and nothing is sent.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the local cart is cleared.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<&Cart, ApiError> {
        let Some(token) = &self.token else {
            self.cart = Cart::empty();
            return Ok(&self.cart);
        };
        match self.client.get_cart(token).await {
            Ok(cart) => self.cart = cart,
            Err(e) => {
                warn!(error = %e, "Cart fetch failed, clearing local cart");
                self.cart = Cart::empty();
                return Err(e);
            }
        }
        Ok(&self.cart)
    }

    /// Add `quantity` of `product` with an optional size and colour.
    ///
    /// See [`CartSelection::resolve`] for how the variant is chosen.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] without a token, a validation
    /// error for an invalid selection, or the request error. The local cart
    /// is unchanged on error.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add(
        &mut self,
        product: &Product,
        quantity: u32,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Result<&Cart, ApiError> {
        let token = self.token()?;
        let selection = CartSelection::resolve(product, quantity, size, color)?;
        let cart = self.client.add_to_cart(token, &selection).await?;
        self.cart = cart;
        Ok(&self.cart)
    }

    /// Set a line's quantity. Zero is forwarded and removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] without a token, a validation
    /// error for a negative quantity, or the request error. The local cart
    /// is unchanged on error.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn update(&mut self, item_id: &CartItemId, quantity: i64) -> Result<&Cart, ApiError> {
        let token = self.token()?;
        let quantity = quantity_update(quantity)?;
        let cart = self.client.update_cart_item(token, item_id, quantity).await?;
        self.cart = cart;
        Ok(&self.cart)
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] without a token or the request
    /// error. The local cart is unchanged on error.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn remove(&mut self, item_id: &CartItemId) -> Result<&Cart, ApiError> {
        let token = self.token()?;
        let cart = self.client.remove_cart_item(token, item_id).await?;
        self.cart = cart;
        Ok(&self.cart)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] without a token or the request
    /// error. The local cart is unchanged on error.
    #[instrument(skip(self))]
    pub async fn clear(&mut self) -> Result<&Cart, ApiError> {
        let token = self.token()?;
        let cart = self.client.clear_cart(token).await?;
        self.cart = cart;
        Ok(&self.cart)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use loomi_core::ValidationError;

    use super::*;
    use crate::store::test_support::{offline_client, product};

    fn line() -> CartItemId {
        CartItemId::parse("line-1").unwrap()
    }

    #[tokio::test]
    async fn test_no_token_refresh_clears_without_network() {
        let mut store = CartStore::new(offline_client(), None);
        assert!(!store.is_signed_in());
        // The offline client would fail if it were reached.
        assert!(store.refresh().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_token_mutations_are_unauthenticated() {
        let mut store = CartStore::new(offline_client(), None);
        let p = product("p1", &["M"], &[]);

        assert!(matches!(
            store.add(&p, 1, None, None).await,
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(
            store.update(&line(), 2).await,
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(
            store.remove(&line()).await,
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(store.clear().await, Err(ApiError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_validation_runs_before_network() {
        let token = AuthToken::new("t0ken").unwrap();
        let mut store = CartStore::new(offline_client(), Some(token));
        let p = product("p1", &["M"], &["red", "blue"]);

        let err = store.add(&p, 1, Some("M"), None).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::MissingColor { .. })
        ));

        let err = store.add(&p, 0, Some("M"), Some("red")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ValidationError::ZeroQuantity)));

        let err = store.update(&line(), -1).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::NegativeQuantity)
        ));
        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_clears_cart() {
        let token = AuthToken::new("t0ken").unwrap();
        let mut store = CartStore::new(offline_client(), Some(token));
        let err = store.refresh().await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Transport);
        assert!(store.cart().is_empty());
    }
}
