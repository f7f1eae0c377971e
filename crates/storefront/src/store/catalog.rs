//! Catalog store with last-write-wins loading.

use loomi_core::Product;
use loomi_core::catalog::Catalog;
use tracing::{debug, info, instrument, warn};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Where the catalog is in its lifecycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CatalogState {
    /// Nothing requested yet.
    #[default]
    Empty,
    /// A load is in flight.
    Loading,
    /// Loaded.
    Ready(Catalog),
    /// The last load failed; holds the user-facing notice.
    Failed(String),
}

/// Proof of a started load. Only the most recently issued ticket can
/// install a result.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a load ticket must be passed to `CatalogStore::complete`"]
pub struct LoadTicket {
    generation: u64,
}

/// Holds the fetched catalog for the session.
#[derive(Debug, Default)]
pub struct CatalogStore {
    state: CatalogState,
    generation: u64,
}

impl CatalogStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: CatalogState::Empty,
            generation: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &CatalogState {
        &self.state
    }

    /// The loaded catalog, if any.
    #[must_use]
    pub const fn catalog(&self) -> Option<&Catalog> {
        match &self.state {
            CatalogState::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    /// All products; empty unless loaded.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        self.catalog().map(Catalog::products).unwrap_or_default()
    }

    /// Start a load. Any earlier ticket is superseded.
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = CatalogState::Loading;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Install a load result.
    ///
    /// Returns `Ok(false)` without touching state when `ticket` has been
    /// superseded by a later [`begin`](Self::begin).
    ///
    /// # Errors
    ///
    /// Returns the load error after moving to [`CatalogState::Failed`].
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<Catalog, ApiError>,
    ) -> Result<bool, ApiError> {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Discarding superseded catalog load"
            );
            return Ok(false);
        }

        match result {
            Ok(catalog) => {
                info!(
                    products = catalog.products().len(),
                    categories = catalog.categories().len(),
                    "Catalog loaded"
                );
                self.state = CatalogState::Ready(catalog);
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "Catalog load failed");
                self.state = CatalogState::Failed(e.notice());
                Err(e)
            }
        }
    }

    /// Fetch and install the catalog.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the store is left in [`CatalogState::Failed`].
    #[instrument(skip(self, client))]
    pub async fn load(&mut self, client: &ApiClient) -> Result<&Catalog, ApiError> {
        let ticket = self.begin();
        let result = client.fetch_catalog().await;
        self.complete(ticket, result)?;
        self.catalog()
            .ok_or_else(|| ApiError::NotFound("catalog".to_string()))
    }

    /// Drop cached responses and load again.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the store is left in [`CatalogState::Failed`].
    pub async fn reload(&mut self, client: &ApiClient) -> Result<&Catalog, ApiError> {
        client.invalidate_catalog().await;
        self.load(client).await
    }
}
