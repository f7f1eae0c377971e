//! Catalog records: products and categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::id::{CategoryId, ProductId};
use super::price::{self, Price};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier.
    #[serde(rename = "_id")]
    pub id: CategoryId,
    /// Display name, used for filter labels and the `category` query parameter.
    pub name: String,
}

/// A product image entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Image URL.
    pub url: String,
}

/// A product as served by the catalog endpoint.
///
/// Owned by the backend and immutable from the client's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Price; `None` when the backend sent a non-numeric value.
    #[serde(deserialize_with = "price::deserialize_lenient")]
    pub price: Option<Price>,
    /// Owning category. The backend sends either a bare ID or a populated
    /// `{ _id, name }` document; both normalise to the ID.
    #[serde(deserialize_with = "deserialize_category_ref")]
    pub category: CategoryId,
    /// Size labels, compared uppercased.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Colour labels, hex or CSS names, compared exactly.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Creation timestamp, drives the `latest` sort.
    pub created_at: DateTime<Utc>,
    /// Primary image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Secondary images.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ProductImage>,
}

impl Product {
    /// The image to show: `imageUrl`, else the first gallery image.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .or_else(|| self.images.first().map(|img| img.url.as_str()))
    }

    /// The product's own label for `size`, matched case-insensitively.
    ///
    /// Labels are compared uppercased, the same way the size filter
    /// compares them.
    #[must_use]
    pub fn size_label(&self, size: &str) -> Option<&str> {
        let wanted = size.to_uppercase();
        self.sizes
            .iter()
            .find(|s| s.to_uppercase() == wanted)
            .map(String::as_str)
    }

    /// Whether the product offers exactly this colour label.
    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// The summary shape embedded in cart, wishlist and order payloads.
    #[must_use]
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            image_url: self.image().map(str::to_string),
        }
    }
}

/// A populated product reference inside cart, wishlist and order responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    /// Product identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Price; `None` when missing or non-numeric.
    #[serde(default, deserialize_with = "price::deserialize_lenient")]
    pub price: Option<Price>,
    /// Primary image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryRef {
    Id(CategoryId),
    Populated {
        #[serde(rename = "_id")]
        id: CategoryId,
    },
}

fn deserialize_category_ref<'de, D>(deserializer: D) -> Result<CategoryId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match CategoryRef::deserialize(deserializer)? {
        CategoryRef::Id(id) | CategoryRef::Populated { id } => id,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product_json() -> serde_json::Value {
        json!({
            "_id": "p1",
            "name": "Linen Shirt",
            "price": 1499,
            "category": "c1",
            "sizes": ["m", "L"],
            "colors": ["#FFFFFF", "navy"],
            "createdAt": "2024-05-01T10:00:00.000Z",
            "imageUrl": "https://cdn.example/p1.jpg"
        })
    }

    #[test]
    fn test_deserialize_full_product() {
        let product: Product = serde_json::from_value(product_json()).unwrap();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.price, Some(Price::from_units(1499)));
        assert_eq!(product.category.as_str(), "c1");
        assert_eq!(product.image(), Some("https://cdn.example/p1.jpg"));
    }

    #[test]
    fn test_populated_category_normalises_to_id() {
        let mut value = product_json();
        value["category"] = json!({ "_id": "c9", "name": "Shirts" });
        let product: Product = serde_json::from_value(value).unwrap();
        assert_eq!(product.category.as_str(), "c9");
    }

    #[test]
    fn test_missing_required_fields_are_rejected() {
        for field in ["_id", "name", "price", "category", "createdAt"] {
            let mut value = product_json();
            value.as_object_mut().unwrap().remove(field);
            assert!(
                serde_json::from_value::<Product>(value).is_err(),
                "missing {field} should be rejected"
            );
        }
    }

    #[test]
    fn test_optional_collections_default_to_empty() {
        let mut value = product_json();
        let obj = value.as_object_mut().unwrap();
        obj.remove("sizes");
        obj.remove("colors");
        obj.remove("imageUrl");
        let product: Product = serde_json::from_value(value).unwrap();
        assert!(product.sizes.is_empty());
        assert!(product.colors.is_empty());
        assert_eq!(product.image(), None);
    }

    #[test]
    fn test_image_falls_back_to_gallery() {
        let mut value = product_json();
        value.as_object_mut().unwrap().remove("imageUrl");
        value["images"] = json!([{ "url": "https://cdn.example/g1.jpg" }]);
        let product: Product = serde_json::from_value(value).unwrap();
        assert_eq!(product.image(), Some("https://cdn.example/g1.jpg"));
    }

    #[test]
    fn test_size_ignores_case_but_color_is_exact() {
        let product: Product = serde_json::from_value(product_json()).unwrap();
        assert_eq!(product.size_label("M"), Some("m"));
        assert_eq!(product.size_label("l"), Some("L"));
        assert_eq!(product.size_label("XL"), None);
        assert!(product.offers_color("navy"));
        assert!(!product.offers_color("Navy"));
    }

    #[test]
    fn test_size_label_handles_non_ascii_case() {
        let mut value = product_json();
        value["sizes"] = json!(["pequeño", "Größe 2"]);
        let product: Product = serde_json::from_value(value).unwrap();
        assert_eq!(product.size_label("PEQUEÑO"), Some("pequeño"));
        assert_eq!(product.size_label("größe 2"), Some("Größe 2"));
        assert_eq!(product.size_label("grande"), None);
    }

    #[test]
    fn test_summary_without_price_is_unpriced() {
        let summary: ProductSummary =
            serde_json::from_value(json!({ "_id": "p1", "name": "Tee" })).unwrap();
        assert_eq!(summary.price, None);
    }
}
