//! `/wishlist` endpoints.

use loomi_core::{ProductId, ProductSummary};
use reqwest::Method;
use tracing::instrument;

use super::ApiClient;
use super::wire::{WishlistAdd, WishlistResponse};
use crate::error::ApiError;
use crate::session::AuthToken;

impl ApiClient {
    /// Fetch the signed-in user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn get_wishlist(&self, token: &AuthToken) -> Result<Vec<ProductSummary>, ApiError> {
        let request = self.request(Method::GET, &["wishlist"], Some(token))?;
        let response: WishlistResponse = self.execute(request).await?;
        Ok(response.into_products())
    }

    /// Add a product to the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token), fields(product_id = %product_id))]
    pub async fn add_to_wishlist(
        &self,
        token: &AuthToken,
        product_id: &ProductId,
    ) -> Result<Vec<ProductSummary>, ApiError> {
        let request = self
            .request(Method::POST, &["wishlist"], Some(token))?
            .json(&WishlistAdd { product_id });
        let response: WishlistResponse = self.execute(request).await?;
        Ok(response.into_products())
    }

    /// Remove a product from the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token), fields(product_id = %product_id))]
    pub async fn remove_from_wishlist(
        &self,
        token: &AuthToken,
        product_id: &ProductId,
    ) -> Result<Vec<ProductSummary>, ApiError> {
        let request =
            self.request(Method::DELETE, &["wishlist", product_id.as_str()], Some(token))?;
        let response: WishlistResponse = self.execute(request).await?;
        Ok(response.into_products())
    }
}
