//! Catalog fetch, record validation, caching and listing over HTTP.

#![allow(clippy::unwrap_used)]

use loomi_core::catalog::{Listing, ShopQuery, SortKey};
use loomi_integration_tests::{FakeBackend, category_json, product_json, sample_catalog};
use loomi_storefront::store::{CatalogState, CatalogStore};
use serde_json::json;

async fn backend() -> FakeBackend {
    let backend = FakeBackend::start().await.unwrap();
    let (products, categories) = sample_catalog();
    backend.set_products(products);
    backend.set_categories(categories);
    backend
}

#[tokio::test]
async fn test_fetch_catalog_decodes_products_and_categories() {
    let backend = backend().await;
    let client = backend.client().unwrap();

    let catalog = client.fetch_catalog().await.unwrap();
    assert_eq!(catalog.products().len(), 4);
    assert_eq!(catalog.categories().len(), 2);

    let p3 = catalog.product("p3").unwrap();
    assert_eq!(p3.price.unwrap().display_inr(), "₹650.00");
    assert_eq!(p3.image(), Some("https://cdn.example.com/p3.jpg"));
}

#[tokio::test]
async fn test_catalog_requests_are_unauthenticated() {
    let backend = backend().await;
    backend.client().unwrap().fetch_catalog().await.unwrap();

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.authorization.is_none()));
}

#[tokio::test]
async fn test_malformed_records_are_dropped() {
    let backend = FakeBackend::start().await.unwrap();
    backend.set_categories(vec![category_json("c1", "Kurtas"), json!({ "name": "No ID" })]);
    backend.set_products(vec![
        product_json("ok", "Good", json!(100), "c1", &[], &[], "2024-01-01T00:00:00Z"),
        // Missing price field
        json!({ "_id": "no-price", "name": "x", "category": "c1", "createdAt": "2024-01-01T00:00:00Z" }),
        // Blank ID
        product_json(" ", "Blank", json!(100), "c1", &[], &[], "2024-01-01T00:00:00Z"),
        // Non-numeric price is kept but unpriced
        product_json("junk-price", "Junk", json!("call us"), "c1", &[], &[], "2024-01-01T00:00:00Z"),
        // Populated category document
        json!({
            "_id": "populated",
            "name": "Populated",
            "price": 300,
            "category": { "_id": "c1", "name": "Kurtas" },
            "createdAt": "2024-01-02T00:00:00Z",
        }),
    ]);

    let catalog = backend.client().unwrap().fetch_catalog().await.unwrap();
    let ids: Vec<&str> = catalog.products().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["ok", "junk-price", "populated"]);
    assert_eq!(catalog.categories().len(), 1);
    assert!(catalog.product("junk-price").unwrap().price.is_none());

    // Unpriced products never pass the price filter
    let page = Listing::default().display_page(&catalog);
    assert_eq!(page.total_count, 2);
}

#[tokio::test]
async fn test_catalog_is_cached_until_invalidated() {
    let backend = backend().await;
    let client = backend.client().unwrap();

    client.fetch_catalog().await.unwrap();
    client.fetch_catalog().await.unwrap();
    assert_eq!(backend.hits("GET", "/product/get-product"), 1);
    assert_eq!(backend.hits("GET", "/category/get-category"), 1);

    let mut store = CatalogStore::new();
    store.reload(&client).await.unwrap();
    assert_eq!(backend.hits("GET", "/product/get-product"), 2);
}

#[tokio::test]
async fn test_catalog_failure_moves_store_to_failed() {
    let backend = backend().await;
    backend.script_raw("GET", "/category/get-category", axum::http::StatusCode::BAD_GATEWAY, "");
    let client = backend.client().unwrap();

    let mut store = CatalogStore::new();
    assert!(store.load(&client).await.is_err());
    assert!(matches!(store.state(), CatalogState::Failed(_)));
    assert!(store.products().is_empty());
}

#[tokio::test]
async fn test_listing_from_shop_query() {
    let backend = backend().await;
    let client = backend.client().unwrap();
    let mut store = CatalogStore::new();
    let catalog = store.load(&client).await.unwrap();

    let query = ShopQuery::parse("?category=Kurtas&sort=price-low-high");
    let listing = Listing::from_query(&query, catalog);
    assert_eq!(listing.sort(), SortKey::PriceLowHigh);

    let page = listing.display_page(catalog);
    let ids: Vec<&str> = page.items.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["p3", "p1"]);

    // Counts ignore every other constraint
    let counts: Vec<(&str, usize)> = page
        .category_counts
        .iter()
        .map(|c| (c.category.name.as_str(), c.count))
        .collect();
    assert_eq!(counts, [("Kurtas", 2), ("Sarees", 2)]);
    assert_eq!(page.sizes, ["FREE", "L", "M", "S"]);

    assert_eq!(
        ShopQuery::from_listing(&listing).to_query_string(),
        "category=Kurtas&sort=price-low-high"
    );
}

#[tokio::test]
async fn test_unknown_category_in_query_is_ignored() {
    let backend = backend().await;
    let client = backend.client().unwrap();
    let mut store = CatalogStore::new();
    let catalog = store.load(&client).await.unwrap();

    let listing = Listing::from_query(&ShopQuery::parse("category=Shoes"), catalog);
    assert!(listing.filter().categories.is_empty());
    // Default price range caps at 100000, everything fits
    assert_eq!(listing.display_page(catalog).total_count, 4);
}
