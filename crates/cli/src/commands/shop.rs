//! Catalog browsing commands.

use std::io::Write;

use clap::Args;
use loomi_core::catalog::{Catalog, Listing, ShopQuery, SortKey, total_pages};
use loomi_core::validation::search_term;
use loomi_storefront::store::CatalogStore;
use rust_decimal::Decimal;

use super::{CommandError, Context};
use crate::render;

/// Listing options. Flags are applied on top of `--query`.
#[derive(Debug, Default, Args)]
pub struct ShopArgs {
    /// Shop query string, e.g. `category=Kurtas&sort=price-low-high&page=2`
    #[arg(long)]
    pub query: Option<String>,

    /// Category name (repeatable)
    #[arg(long)]
    pub category: Vec<String>,

    /// Case-insensitive name search
    #[arg(long)]
    pub search: Option<String>,

    /// `latest`, `price-low-high` or `price-high-low`
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// 1-based page number
    #[arg(long)]
    pub page: Option<usize>,

    /// Size (repeatable)
    #[arg(long)]
    pub size: Vec<String>,

    /// Colour (repeatable)
    #[arg(long)]
    pub color: Vec<String>,

    /// Minimum price in rupees
    #[arg(long)]
    pub min: Option<Decimal>,

    /// Maximum price in rupees
    #[arg(long)]
    pub max: Option<Decimal>,
}

impl ShopArgs {
    /// Build the listing state these options describe.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank `--search`, or
    /// [`CommandError::PageOutOfRange`] for a page past the end.
    pub fn listing(&self, catalog: &Catalog, ctx: &Context) -> Result<Listing, CommandError> {
        let mut query = self
            .query
            .as_deref()
            .map(ShopQuery::parse)
            .unwrap_or_default();
        if let Some(search) = &self.search {
            query.search = Some(search_term(search)?);
        }
        if self.sort.is_some() {
            query.sort = self.sort;
        }

        let mut listing = Listing::from_query(&query, catalog).with_page_size(ctx.config.page_size);
        let page = self.page.or(query.page).unwrap_or(1);

        if self.narrows() {
            listing.update_filter(|filter| {
                filter.categories.extend(self.category.iter().cloned());
                filter
                    .sizes
                    .extend(self.size.iter().map(|size| size.to_uppercase()));
                filter.colors.extend(self.color.iter().cloned());
                if let Some(min) = self.min {
                    filter.set_min_price(min);
                }
                if let Some(max) = self.max {
                    filter.set_max_price(max);
                }
            });
        }

        if page != 1 && !listing.go_to_page(catalog, page) {
            let count = listing.sorted(catalog).len();
            return Err(CommandError::PageOutOfRange {
                page,
                total: total_pages(count, listing.page_size()),
            });
        }
        Ok(listing)
    }

    fn narrows(&self) -> bool {
        !self.category.is_empty()
            || !self.size.is_empty()
            || !self.color.is_empty()
            || self.min.is_some()
            || self.max.is_some()
    }
}

/// `loomi shop`
pub async fn listing(
    ctx: &Context,
    args: &ShopArgs,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let mut store = CatalogStore::new();
    let catalog = store.load(&ctx.client).await?;
    let listing = args.listing(catalog, ctx)?;
    let page = listing.display_page(catalog);
    tracing::debug!(
        page = page.number,
        total_pages = page.total_pages,
        matches = page.total_count,
        "Rendering listing"
    );
    render::listing(out, &listing, &page)?;
    Ok(())
}

/// `loomi categories`
pub async fn categories(ctx: &Context, out: &mut impl Write) -> Result<(), CommandError> {
    let mut store = CatalogStore::new();
    let catalog = store.load(&ctx.client).await?;
    render::categories(out, catalog)?;
    Ok(())
}
