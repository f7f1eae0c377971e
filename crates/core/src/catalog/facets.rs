//! Sidebar counters and available size/colour options.

use std::collections::BTreeSet;

use serde::Serialize;

use super::Catalog;
use super::filter::CategoryPredicate;
use crate::types::Category;

/// Products matching a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount<'a> {
    pub category: &'a Category,
    pub count: usize,
}

/// Per-category product counts over the whole catalog.
///
/// Counts use the category predicate alone: size, colour, price and search
/// selections do not change them.
#[must_use]
pub fn category_counts(catalog: &Catalog) -> Vec<CategoryCount<'_>> {
    catalog
        .categories()
        .iter()
        .map(|category| {
            let names = BTreeSet::from([category.name.clone()]);
            let predicate = CategoryPredicate::new(catalog, &names);
            let count = catalog
                .products()
                .iter()
                .filter(|p| predicate.matches(p))
                .count();
            CategoryCount { category, count }
        })
        .collect()
}

/// Every size offered across the catalog, uppercased, sorted, deduplicated.
#[must_use]
pub fn available_sizes(catalog: &Catalog) -> Vec<String> {
    catalog
        .products()
        .iter()
        .flat_map(|p| p.sizes.iter().map(|s| s.to_uppercase()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Every colour offered across the catalog, sorted, deduplicated.
#[must_use]
pub fn available_colors(catalog: &Catalog) -> Vec<String> {
    catalog
        .products()
        .iter()
        .flat_map(|p| p.colors.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{category, product, scenario, with_variants};
    use crate::catalog::{FilterSpec, Listing};

    fn counts(catalog: &Catalog) -> Vec<(String, usize)> {
        category_counts(catalog)
            .into_iter()
            .map(|c| (c.category.name.clone(), c.count))
            .collect()
    }

    #[test]
    fn test_counts_per_category() {
        let catalog = scenario();
        assert_eq!(
            counts(&catalog),
            [("A".to_string(), 2), ("B".to_string(), 1)]
        );
    }

    #[test]
    fn test_counts_ignore_other_predicates() {
        let catalog = Catalog::new(
            vec![
                with_variants(product("1", Some(10), "a"), &["M"], &["red"]),
                with_variants(product("2", Some(10), "a"), &["L"], &["blue"]),
                with_variants(product("3", Some(10), "b"), &["M"], &["red"]),
            ],
            vec![category("a", "A"), category("b", "B")],
        );
        let mut listing = Listing::default();
        listing.update_filter(|f: &mut FilterSpec| {
            f.toggle_size("L");
            f.toggle_color("blue");
        });
        let page = listing.display_page(&catalog);
        assert_eq!(page.total_count, 1);

        let shown: Vec<_> = page
            .category_counts
            .iter()
            .map(|c| (c.category.name.as_str(), c.count))
            .collect();
        assert_eq!(shown, [("A", 2), ("B", 1)]);
    }

    #[test]
    fn test_empty_category_counts_zero() {
        let catalog = Catalog::new(
            vec![product("1", Some(10), "a")],
            vec![category("a", "A"), category("z", "Z")],
        );
        assert_eq!(
            counts(&catalog),
            [("A".to_string(), 1), ("Z".to_string(), 0)]
        );
    }

    #[test]
    fn test_available_options() {
        let catalog = Catalog::new(
            vec![
                with_variants(product("1", Some(1), "c"), &["m", "S"], &["red", "#fff"]),
                with_variants(product("2", Some(1), "c"), &["M", "xl"], &["red"]),
            ],
            vec![category("c", "C")],
        );
        assert_eq!(available_sizes(&catalog), ["M", "S", "XL"]);
        assert_eq!(available_colors(&catalog), ["#fff", "red"]);
    }
}
