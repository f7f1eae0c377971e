//! The shop listing's query string.
//!
//! `/shop?category=Kurtas&search=linen&sort=price-low-high&page=2` seeds the
//! listing state; the state is mirrored back into the same shape so a listing
//! can be bookmarked or shared.

use url::form_urlencoded;

use super::{Catalog, FilterSpec, Listing, SortKey};

/// Parsed shop query parameters.
///
/// Unknown keys are ignored. Values that do not parse (an unknown sort key, a
/// non-numeric page) are dropped so the listing falls back to its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopQuery {
    /// Category display name.
    pub category: Option<String>,
    /// Free-text search term, trimmed and non-blank.
    pub search: Option<String>,
    /// Sort key.
    pub sort: Option<SortKey>,
    /// 1-based page number.
    pub page: Option<usize>,
}

impl ShopQuery {
    /// Parse a query string, with or without the leading `?`.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut parsed = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            match &*key {
                "category" if !value.is_empty() => parsed.category = Some(value.to_string()),
                "search" if !value.is_empty() => parsed.search = Some(value.to_string()),
                "sort" => parsed.sort = value.parse().ok(),
                "page" => parsed.page = value.parse::<usize>().ok().filter(|&p| p >= 1),
                _ => {}
            }
        }
        parsed
    }

    /// Build the filter specification this query seeds.
    ///
    /// The category is only selected when it names a known category.
    #[must_use]
    pub fn seed_filter(&self, catalog: &Catalog) -> FilterSpec {
        let mut spec = FilterSpec::default();
        if let Some(name) = &self.category
            && catalog.category_named(name).is_some()
        {
            spec.toggle_category(name);
        }
        spec.search.clone_from(&self.search);
        spec
    }

    /// Mirror listing state back into query parameters.
    #[must_use]
    pub fn from_listing(listing: &Listing) -> Self {
        let filter = listing.filter();
        let category = match filter.categories.len() {
            1 => filter.categories.first().cloned(),
            _ => None,
        };
        Self {
            category,
            search: filter.search.clone(),
            sort: (listing.sort() != SortKey::default()).then_some(listing.sort()),
            page: (listing.page() > 1).then_some(listing.page()),
        }
    }

    /// Encode as a query string without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        if let Some(category) = &self.category {
            out.append_pair("category", category);
        }
        if let Some(search) = &self.search {
            out.append_pair("search", search);
        }
        if let Some(sort) = self.sort {
            out.append_pair("sort", sort.as_str());
        }
        if let Some(page) = self.page {
            out.append_pair("page", &page.to_string());
        }
        out.finish()
    }
}
