//! Filter specification and the product predicate.

use std::collections::{BTreeSet, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Catalog;
use crate::types::{CategoryId, PriceRange, Product};

/// The user's current filter choices.
///
/// Each set field is an "any of" constraint that is vacuous when empty; the
/// fields are ANDed together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Selected category display names.
    pub categories: BTreeSet<String>,
    /// Selected sizes, stored uppercased.
    pub sizes: BTreeSet<String>,
    /// Selected colours, matched exactly.
    pub colors: BTreeSet<String>,
    /// Inclusive price bounds.
    pub price_range: PriceRange,
    /// Case-insensitive name search term.
    pub search: Option<String>,
}

impl FilterSpec {
    /// Toggle a category name on or off.
    pub fn toggle_category(&mut self, name: &str) {
        toggle(&mut self.categories, name.to_string());
    }

    /// Toggle a size on or off. Sizes are normalised to uppercase.
    pub fn toggle_size(&mut self, size: &str) {
        toggle(&mut self.sizes, size.to_uppercase());
    }

    /// Toggle a colour on or off.
    pub fn toggle_color(&mut self, color: &str) {
        toggle(&mut self.colors, color.to_string());
    }

    /// Set the lower price bound.
    pub const fn set_min_price(&mut self, min: Decimal) {
        self.price_range.min = min;
    }

    /// Set the upper price bound.
    pub const fn set_max_price(&mut self, max: Decimal) {
        self.price_range.max = max;
    }

    /// Whether nothing narrows the catalog.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.categories.is_empty()
            && self.sizes.is_empty()
            && self.colors.is_empty()
            && self.price_range == PriceRange::default()
            && self.search.is_none()
    }

    /// Whether `product` passes the size constraint.
    #[must_use]
    pub fn matches_size(&self, product: &Product) -> bool {
        self.sizes.is_empty()
            || product
                .sizes
                .iter()
                .any(|size| self.sizes.contains(&size.to_uppercase()))
    }

    /// Whether `product` passes the colour constraint.
    #[must_use]
    pub fn matches_color(&self, product: &Product) -> bool {
        self.colors.is_empty() || product.colors.iter().any(|c| self.colors.contains(c))
    }

    /// Whether `product` passes the price constraint. Unpriced products never do.
    #[must_use]
    pub fn matches_price(&self, product: &Product) -> bool {
        product
            .price
            .is_some_and(|price| self.price_range.contains(price))
    }

    /// Whether `product` passes the search constraint.
    #[must_use]
    pub fn matches_search(&self, product: &Product) -> bool {
        self.search.as_deref().is_none_or(|term| {
            product
                .name
                .to_lowercase()
                .contains(&term.to_lowercase())
        })
    }
}

fn toggle(set: &mut BTreeSet<String>, value: String) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

/// Category constraint resolved to IDs.
///
/// `None` means "no category constraint"; an empty set means the selected
/// names matched no category, so nothing passes.
pub(crate) struct CategoryPredicate<'a> {
    ids: Option<HashSet<&'a CategoryId>>,
}

impl<'a> CategoryPredicate<'a> {
    pub(crate) fn new(catalog: &'a Catalog, names: &BTreeSet<String>) -> Self {
        let ids = (!names.is_empty()).then(|| catalog.resolve_category_names(names));
        Self { ids }
    }

    pub(crate) fn matches(&self, product: &Product) -> bool {
        self.ids
            .as_ref()
            .is_none_or(|ids| ids.contains(&product.category))
    }
}

/// Apply the filter specification, preserving catalog order.
#[must_use]
pub fn compute_filtered<'a>(catalog: &'a Catalog, spec: &FilterSpec) -> Vec<&'a Product> {
    let category = CategoryPredicate::new(catalog, &spec.categories);
    catalog
        .products()
        .iter()
        .filter(|p| {
            category.matches(p)
                && spec.matches_size(p)
                && spec.matches_color(p)
                && spec.matches_price(p)
                && spec.matches_search(p)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::catalog::fixtures::{category, ids, product, scenario, with_variants};

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_unconstrained_returns_everything_in_order() {
        let catalog = scenario();
        let spec = FilterSpec::default();
        assert!(spec.is_unconstrained());
        assert_eq!(ids(&compute_filtered(&catalog, &spec)), ["1", "2", "3"]);
    }

    #[test]
    fn test_category_filter_is_exact() {
        let catalog = scenario();
        let mut spec = FilterSpec::default();
        spec.toggle_category("A");
        let result = compute_filtered(&catalog, &spec);
        assert_eq!(ids(&result), ["1", "3"]);

        // No false positives or negatives across the whole catalog.
        for p in catalog.products() {
            let in_a = p.category.as_str() == "cat-a";
            assert_eq!(result.iter().any(|r| r.id == p.id), in_a);
        }
    }

    #[test]
    fn test_category_names_never_compared_to_ids() {
        let catalog = scenario();
        let mut spec = FilterSpec::default();
        // "cat-a" is an ID, not a display name.
        spec.toggle_category("cat-a");
        assert!(compute_filtered(&catalog, &spec).is_empty());
    }

    #[test]
    fn test_price_range_inclusive() {
        let catalog = scenario();
        let mut spec = FilterSpec::default();
        spec.set_min_price(d("15"));
        spec.set_max_price(d("25"));
        assert_eq!(ids(&compute_filtered(&catalog, &spec)), ["3"]);

        spec.set_min_price(d("10"));
        spec.set_max_price(d("20"));
        assert_eq!(ids(&compute_filtered(&catalog, &spec)), ["1", "3"]);
    }

    #[test]
    fn test_unpriced_products_are_excluded() {
        let catalog = Catalog::new(
            vec![product("1", None, "c"), product("2", Some(5), "c")],
            vec![category("c", "C")],
        );
        assert_eq!(ids(&compute_filtered(&catalog, &FilterSpec::default())), ["2"]);
    }

    #[test]
    fn test_size_matches_uppercased_any() {
        let catalog = Catalog::new(
            vec![
                with_variants(product("1", Some(5), "c"), &["s", "m"], &[]),
                with_variants(product("2", Some(5), "c"), &["XL"], &[]),
                product("3", Some(5), "c"),
            ],
            vec![category("c", "C")],
        );
        let mut spec = FilterSpec::default();
        spec.toggle_size("m");
        assert!(spec.sizes.contains("M"));
        assert_eq!(ids(&compute_filtered(&catalog, &spec)), ["1"]);

        spec.toggle_size("xl");
        assert_eq!(ids(&compute_filtered(&catalog, &spec)), ["1", "2"]);
    }

    #[test]
    fn test_size_filter_and_size_label_agree_on_case() {
        let kurta = with_variants(product("1", Some(5), "c"), &["pequeño"], &[]);
        let catalog = Catalog::new(vec![kurta.clone()], vec![category("c", "C")]);

        let mut spec = FilterSpec::default();
        spec.toggle_size("PEQUEÑO");
        assert_eq!(ids(&compute_filtered(&catalog, &spec)), ["1"]);
        assert_eq!(kurta.size_label("PEQUEÑO"), Some("pequeño"));
    }

    #[test]
    fn test_color_matches_exactly() {
        let catalog = Catalog::new(
            vec![
                with_variants(product("1", Some(5), "c"), &[], &["Red", "#000"]),
                with_variants(product("2", Some(5), "c"), &[], &["red"]),
            ],
            vec![category("c", "C")],
        );
        let mut spec = FilterSpec::default();
        spec.toggle_color("red");
        assert_eq!(ids(&compute_filtered(&catalog, &spec)), ["2"]);
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let catalog = Catalog::new(
            vec![
                with_variants(product("1", Some(10), "a"), &["M"], &["red"]),
                with_variants(product("2", Some(10), "a"), &["M"], &["blue"]),
                with_variants(product("3", Some(10), "b"), &["M"], &["red"]),
            ],
            vec![category("a", "A"), category("b", "B")],
        );
        let mut spec = FilterSpec::default();
        spec.toggle_category("A");
        spec.toggle_size("M");
        spec.toggle_color("red");
        assert_eq!(ids(&compute_filtered(&catalog, &spec)), ["1"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let mut catalog = scenario();
        let mut products = catalog.products().to_vec();
        products[1].name = "Cotton KURTA".to_string();
        catalog = Catalog::new(products, catalog.categories().to_vec());

        let spec = FilterSpec {
            search: Some("kurta".to_string()),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&compute_filtered(&catalog, &spec)), ["2"]);
    }

    #[test]
    fn test_toggle_twice_removes() {
        let mut spec = FilterSpec::default();
        spec.toggle_color("red");
        spec.toggle_color("red");
        assert!(spec.colors.is_empty());
    }
}
