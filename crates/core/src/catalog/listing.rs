//! Listing state: filter, sort key and page number together.

use std::num::NonZeroUsize;

use serde::Serialize;

use super::facets::{CategoryCount, available_colors, available_sizes, category_counts};
use super::filter::{FilterSpec, compute_filtered};
use super::page::{DEFAULT_PAGE_SIZE, page_links, paginate, total_pages};
use super::query::ShopQuery;
use super::sort::{SortKey, sort_by};
use super::Catalog;
use crate::types::Product;

/// Everything the shop listing renders for one page.
///
/// Derived from a [`Catalog`] and a [`Listing`]; never edited directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayPage<'a> {
    /// Products on this page, in sort order.
    pub items: Vec<&'a Product>,
    /// 1-based page number.
    pub number: usize,
    pub total_pages: usize,
    /// Products matching the filter across all pages.
    pub total_count: usize,
    pub category_counts: Vec<CategoryCount<'a>>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    /// Pager links, `None` marking a gap.
    pub page_links: Vec<Option<usize>>,
}

/// The user's listing state.
///
/// Changing the filter or the sort key always returns to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    filter: FilterSpec,
    sort: SortKey,
    page: usize,
    page_size: NonZeroUsize,
}

impl Default for Listing {
    fn default() -> Self {
        Self {
            filter: FilterSpec::default(),
            sort: SortKey::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Listing {
    /// Seed a listing from shop query parameters.
    ///
    /// The requested page is clamped to the pages the seeded filter has.
    #[must_use]
    pub fn from_query(query: &ShopQuery, catalog: &Catalog) -> Self {
        let mut listing = Self {
            filter: query.seed_filter(catalog),
            sort: query.sort.unwrap_or_default(),
            ..Self::default()
        };
        listing.page = listing.clamp_page(catalog, query.page.unwrap_or(1));
        listing
    }

    /// Use a different page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    #[must_use]
    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Edit the filter specification and return to page 1.
    pub fn update_filter<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut FilterSpec),
    {
        edit(&mut self.filter);
        self.page = 1;
    }

    /// Change the sort key and return to page 1.
    pub const fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
    }

    /// Move to `page` if it exists for the current filter.
    ///
    /// Returns `false` and leaves the page unchanged otherwise.
    pub fn go_to_page(&mut self, catalog: &Catalog, page: usize) -> bool {
        if page >= 1 && page <= self.total_pages(catalog) {
            self.page = page;
            true
        } else {
            false
        }
    }

    fn total_pages(&self, catalog: &Catalog) -> usize {
        total_pages(compute_filtered(catalog, &self.filter).len(), self.page_size)
    }

    fn clamp_page(&self, catalog: &Catalog, page: usize) -> usize {
        page.clamp(1, self.total_pages(catalog).max(1))
    }

    /// Filtered and sorted products across all pages.
    #[must_use]
    pub fn sorted<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        let mut products = compute_filtered(catalog, &self.filter);
        sort_by(&mut products, self.sort);
        products
    }

    /// Compute the page to display.
    #[must_use]
    pub fn display_page<'a>(&self, catalog: &'a Catalog) -> DisplayPage<'a> {
        let sorted = self.sorted(catalog);
        let page = paginate(&sorted, self.page, self.page_size);
        let number = page.number;
        let total = page.total_pages;
        let total_count = page.total_count;
        let items = page.items.to_vec();

        DisplayPage {
            items,
            number,
            total_pages: total,
            total_count,
            category_counts: category_counts(catalog),
            sizes: available_sizes(catalog),
            colors: available_colors(catalog),
            page_links: page_links(total, number),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{ids, scenario};

    #[test]
    fn test_default_listing_shows_everything_latest() {
        let catalog = scenario();
        let page = Listing::default().display_page(&catalog);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.number, 1);
        assert_eq!(ids(&page.items).len(), 3);
        assert_eq!(page.page_links, vec![Some(1)]);
    }

    #[test]
    fn test_filter_and_sort_changes_reset_page() {
        let catalog = scenario();
        let mut listing = Listing::default().with_page_size(NonZeroUsize::new(1).unwrap());
        assert!(listing.go_to_page(&catalog, 3));
        assert_eq!(listing.page(), 3);

        listing.set_sort(SortKey::PriceHighLow);
        assert_eq!(listing.page(), 1);

        assert!(listing.go_to_page(&catalog, 2));
        listing.update_filter(|f| f.toggle_category("A"));
        assert_eq!(listing.page(), 1);
    }

    #[test]
    fn test_go_to_missing_page_is_rejected() {
        let catalog = scenario();
        let mut listing = Listing::default();
        assert!(!listing.go_to_page(&catalog, 0));
        assert!(!listing.go_to_page(&catalog, 2));
        assert_eq!(listing.page(), 1);
    }

    #[test]
    fn test_second_page_of_size_two() {
        let catalog = scenario();
        let mut listing = Listing::default().with_page_size(NonZeroUsize::new(2).unwrap());
        listing.set_sort(SortKey::PriceLowHigh);
        assert!(listing.go_to_page(&catalog, 2));
        let page = listing.display_page(&catalog);
        assert_eq!(ids(&page.items), ["2"]);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_from_query_seeds_state() {
        let catalog = scenario();
        let query = ShopQuery::parse("category=A&sort=price-low-high&page=1");
        let listing = Listing::from_query(&query, &catalog);
        assert_eq!(listing.sort(), SortKey::PriceLowHigh);
        let page = listing.display_page(&catalog);
        assert_eq!(ids(&page.items), ["1", "3"]);
    }

    #[test]
    fn test_query_page_past_end_is_clamped() {
        let catalog = scenario();
        let listing = Listing::from_query(&ShopQuery::parse("page=50"), &catalog);
        assert_eq!(listing.page(), 1);
        let page = listing.display_page(&catalog);
        assert_eq!(page.number, 1);
        assert_eq!(ids(&page.items).len(), 3);
        assert_eq!(page.page_links, vec![Some(1)]);
    }

    #[test]
    fn test_huge_query_page_does_not_overflow() {
        let catalog = scenario();
        let query = ShopQuery::parse(&format!("page={}", usize::MAX));
        let listing = Listing::from_query(&query, &catalog);
        assert_eq!(listing.page(), 1);
        let page = listing.display_page(&catalog);
        assert_eq!(page.number, 1);
        assert_eq!(page.page_links, vec![Some(1)]);
    }

    #[test]
    fn test_display_page_is_deterministic() {
        let catalog = scenario();
        let mut listing = Listing::default();
        listing.update_filter(|f| f.set_max_price(rust_decimal::Decimal::from(25)));
        assert_eq!(listing.display_page(&catalog), listing.display_page(&catalog));
    }
}
