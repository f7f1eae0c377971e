//! Client-side catalog engine.
//!
//! The full product list is fetched once; everything the shop listing shows
//! is derived from it here, deterministically:
//!
//! ```text
//! Catalog ──► compute_filtered(FilterSpec) ──► sort_by(SortKey) ──► paginate(page)
//! ```
//!
//! - [`filter`] - Filter specification and the conjunctive product predicate
//! - [`sort`] - Sort keys and the stable comparator
//! - [`page`] - Page slicing and pager link windows
//! - [`facets`] - Sidebar counters and available size/colour options
//! - [`query`] - Seeding and mirroring the shop query string
//! - [`listing`] - The listing state that ties the above together
//!
//! # Example
//!
//! ```rust
//! use loomi_core::catalog::{Catalog, Listing, SortKey};
//!
//! let catalog = Catalog::new(Vec::new(), Vec::new());
//! let mut listing = Listing::default();
//! listing.set_sort(SortKey::PriceLowHigh);
//! let page = listing.display_page(&catalog);
//! assert_eq!(page.total_count, 0);
//! ```

pub mod facets;
pub mod filter;
pub mod listing;
pub mod page;
pub mod query;
pub mod sort;

use std::collections::HashSet;

pub use facets::{CategoryCount, available_colors, available_sizes, category_counts};
pub use filter::{FilterSpec, compute_filtered};
pub use listing::{DisplayPage, Listing};
pub use page::{DEFAULT_PAGE_SIZE, Page, page_links, paginate, total_pages};
pub use query::ShopQuery;
pub use sort::{SortKey, UnknownSortKey, sort_by};

use crate::types::{Category, CategoryId, Product};

/// The fetched product list together with the category collection used to
/// resolve category names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Create a catalog.
    #[must_use]
    pub const fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// All products, in backend order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All categories, in backend order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Whether the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a category by its display name.
    #[must_use]
    pub fn category_named(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    /// Resolve display names to category IDs through the category collection.
    ///
    /// Names with no matching category resolve to nothing.
    #[must_use]
    pub fn resolve_category_names<'a, I>(&self, names: I) -> HashSet<&CategoryId>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let names: HashSet<&String> = names.into_iter().collect();
        self.categories
            .iter()
            .filter(|c| names.contains(&c.name))
            .map(|c| &c.id)
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::scenario;

    #[test]
    fn test_resolve_category_names() {
        let catalog = scenario();
        let names = vec!["A".to_string(), "Missing".to_string()];
        let ids = catalog.resolve_category_names(&names);
        assert_eq!(ids.len(), 1);
        assert!(ids.iter().any(|id| id.as_str() == "cat-a"));
    }

    #[test]
    fn test_lookup_helpers() {
        let catalog = scenario();
        assert_eq!(catalog.category_named("B").map(|c| c.id.as_str()), Some("cat-b"));
        assert!(catalog.category_named("b").is_none());
        assert!(catalog.product("3").is_some());
        assert!(catalog.product("4").is_none());
    }
}
