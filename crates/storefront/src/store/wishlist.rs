//! Wishlist store mirroring the server-held wishlist.

use loomi_core::{ProductId, ProductSummary};
use tracing::{debug, instrument, warn};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::session::AuthToken;

/// The signed-in user's wishlist.
#[derive(Debug, Clone)]
pub struct WishlistStore {
    client: ApiClient,
    token: Option<AuthToken>,
    products: Vec<ProductSummary>,
}

impl WishlistStore {
    /// An empty store. Call [`refresh`](Self::refresh) to load the wishlist.
    #[must_use]
    pub const fn new(client: ApiClient, token: Option<AuthToken>) -> Self {
        Self {
            client,
            token,
            products: Vec::new(),
        }
    }

    #[must_use]
    pub fn products(&self) -> &[ProductSummary] {
        &self.products
    }

    /// Whether the product is on the wishlist.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.products.iter().any(|p| &p.id == product_id)
    }

    fn token(&self) -> Result<&AuthToken, ApiError> {
        self.token.as_ref().ok_or(ApiError::Unauthenticated)
    }

    /// Reload the wishlist from the server.
    ///
    /// Without a token the wishlist is cleared and nothing is sent.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the local wishlist is cleared.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<&[ProductSummary], ApiError> {
        let Some(token) = &self.token else {
            self.products.clear();
            return Ok(&self.products);
        };
        match self.client.get_wishlist(token).await {
            Ok(products) => self.products = products,
            Err(e) => {
                warn!(error = %e, "Wishlist fetch failed, clearing local wishlist");
                self.products.clear();
                return Err(e);
            }
        }
        Ok(&self.products)
    }

    /// Add a product. Returns `false` without a request if it is already
    /// on the wishlist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] without a token or the request
    /// error. The local wishlist is unchanged on error.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add(&mut self, product_id: &ProductId) -> Result<bool, ApiError> {
        let token = self.token()?;
        if self.contains(product_id) {
            debug!("Already on wishlist");
            return Ok(false);
        }
        let products = self.client.add_to_wishlist(token, product_id).await?;
        self.products = products;
        Ok(true)
    }

    /// Remove a product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] without a token or the request
    /// error. The local wishlist is unchanged on error.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove(&mut self, product_id: &ProductId) -> Result<&[ProductSummary], ApiError> {
        let token = self.token()?;
        let products = self.client.remove_from_wishlist(token, product_id).await?;
        self.products = products;
        Ok(&self.products)
    }
}
