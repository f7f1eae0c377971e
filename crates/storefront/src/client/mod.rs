//! REST client for the Loomi backend.
//!
//! Uses `reqwest` 0.13 for HTTP with JSON bodies. Products and categories are
//! cached with `moka` (TTL from configuration, 5 minutes by default); cart,
//! wishlist and order calls always go to the network.

mod cache;
mod cart;
mod contact;
mod orders;
pub mod wire;
mod wishlist;

use std::sync::Arc;

use loomi_core::catalog::Catalog;
use loomi_core::{Category, Product};
use moka::future::Cache;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::StorefrontConfig;
use crate::error::ApiError;
use crate::session::AuthToken;

use cache::{CacheKey, CacheValue};
use wire::{CategoriesResponse, ProductsResponse, decode_records};

/// Longest response body excerpt written to logs.
const LOG_BODY_LIMIT: usize = 500;

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the storefront backend.
///
/// Cheap to clone; clones share the connection pool and the catalog cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(config.catalog_ttl)
            .build();

        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!("loomi-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.api_base_url.as_str().trim_end_matches('/').to_string(),
                cache,
            }),
        })
    }

    /// The configured API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Build an endpoint URL from path segments. Segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let path = segments
            .iter()
            .map(|s| urlencoding::encode(s))
            .collect::<Vec<_>>()
            .join("/");
        let raw = format!("{}/{path}", self.inner.base_url);
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// Start a request, optionally authenticated.
    fn request(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&AuthToken>,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(segments)?;
        let builder = self.inner.http.request(method, url);
        Ok(match token {
            Some(token) => builder.bearer_auth(token.expose()),
            None => builder,
        })
    }

    /// Send a request and decode the JSON response.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        // Check for rate limiting
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ApiError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %excerpt(&body),
                "Backend returned non-success status"
            );
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: wire::error_message(&body).unwrap_or_default(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(&body),
                "Failed to parse backend response"
            );
            ApiError::Parse(e)
        })
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// Fetch every product. Malformed records are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Arc<Vec<Product>>, ApiError> {
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let request = self.request(Method::GET, &["product", "get-product"], None)?;
        let response: ProductsResponse = self.execute(request).await?;
        let products = Arc::new(decode_records::<Product>(response.products, "product"));
        debug!(count = products.len(), "Fetched products");

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(Arc::clone(&products)))
            .await;

        Ok(products)
    }

    /// Fetch every category. Malformed records are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn fetch_categories(&self) -> Result<Arc<Vec<Category>>, ApiError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let request = self.request(Method::GET, &["category", "get-category"], None)?;
        let response: CategoriesResponse = self.execute(request).await?;
        let categories = Arc::new(decode_records::<Category>(response.categories, "category"));
        debug!(count = categories.len(), "Fetched categories");

        self.inner
            .cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(Arc::clone(&categories)),
            )
            .await;

        Ok(categories)
    }

    /// Fetch products and categories concurrently and assemble the catalog.
    ///
    /// # Errors
    ///
    /// Returns the first error from either request.
    #[instrument(skip(self))]
    pub async fn fetch_catalog(&self) -> Result<Catalog, ApiError> {
        let (products, categories) =
            tokio::try_join!(self.fetch_products(), self.fetch_categories())?;
        Ok(Catalog::new(
            Arc::unwrap_or_clone(products),
            Arc::unwrap_or_clone(categories),
        ))
    }

    /// Drop cached catalog responses so the next fetch hits the network.
    pub async fn invalidate_catalog(&self) {
        self.inner.cache.invalidate(&CacheKey::Products).await;
        self.inner.cache.invalidate(&CacheKey::Categories).await;
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(LOG_BODY_LIMIT).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        let config = StorefrontConfig::new(Url::parse(base).unwrap());
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_joins_and_encodes() {
        let client = client("http://127.0.0.1:5050/api/v1");
        assert_eq!(
            client.endpoint(&["cart", "line 1/x"]).unwrap().as_str(),
            "http://127.0.0.1:5050/api/v1/cart/line%201%2Fx"
        );
        assert_eq!(
            client.endpoint(&["product", "get-product"]).unwrap().as_str(),
            "http://127.0.0.1:5050/api/v1/product/get-product"
        );
    }

    #[test]
    fn test_base_url_without_path() {
        let client = client("http://localhost:5050");
        assert_eq!(client.base_url(), "http://localhost:5050");
        assert_eq!(
            client.endpoint(&["contact"]).unwrap().as_str(),
            "http://localhost:5050/contact"
        );
    }

    #[test]
    fn test_excerpt_truncates() {
        let body = "x".repeat(LOG_BODY_LIMIT * 2);
        assert_eq!(excerpt(&body).len(), LOG_BODY_LIMIT);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Port 9 (discard) on localhost is not listening in test environments.
        let client = client("http://127.0.0.1:9/api/v1");
        let err = client.fetch_products().await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Transport);
    }
}
