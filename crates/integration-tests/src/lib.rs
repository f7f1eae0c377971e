//! Integration tests for the Loomi storefront client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p loomi-integration-tests
//! ```
//!
//! Each test starts an in-process [`FakeBackend`] on an ephemeral port and
//! drives the real `ApiClient` against it over HTTP. The fake keeps a cart,
//! a wishlist and a catalog in memory, checks bearer tokens like the real
//! backend does, and records every request so tests can assert on what was
//! (or was not) sent.
//!
//! # Test Categories
//!
//! - `catalog` - Catalog fetch, record validation, caching, listing
//! - `cart` - Cart store round trips and variant validation
//! - `wishlist` - Wishlist store round trips
//! - `orders` - Order history, checkout completion, contact form
//! - `errors` - Status codes, error bodies, rate limiting

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use loomi_storefront::session::TokenError;
use loomi_storefront::{ApiClient, ApiError, AuthToken, StorefrontConfig};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

/// The only token the fake backend accepts.
pub const TOKEN: &str = "integration-test-token";

const PREFIX: &str = "/api/v1";

/// A request as seen by the fake backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    /// Path below the API prefix, e.g. `/cart/line-1`.
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct Scripted {
    status: StatusCode,
    body: String,
    retry_after: Option<u64>,
}

#[derive(Debug, Default)]
struct BackendState {
    products: Vec<Value>,
    categories: Vec<Value>,
    cart: Vec<Value>,
    next_line: u32,
    wishlist: Vec<Value>,
    orders: Vec<Value>,
    scripted: HashMap<(String, String), Scripted>,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<BackendState>>;

fn lock(state: &Shared) -> MutexGuard<'_, BackendState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process stand-in for the storefront backend.
#[derive(Debug, Clone)]
pub struct FakeBackend {
    base_url: Url,
    state: Shared,
}

impl FakeBackend {
    /// Bind to an ephemeral port and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let state: Shared = Arc::default();
        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let base_url = Url::parse(&format!("http://{addr}{PREFIX}")).map_err(std::io::Error::other)?;
        Ok(Self { base_url, state })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Configuration pointing at this backend, without a token.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig::new(self.base_url.clone())
    }

    /// Configuration pointing at this backend, signed in with [`TOKEN`].
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected.
    pub fn signed_in_config(&self) -> Result<StorefrontConfig, TokenError> {
        let mut config = self.config();
        config.auth_token = Some(AuthToken::new(TOKEN)?);
        Ok(config)
    }

    /// A client for this backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn client(&self) -> Result<ApiClient, ApiError> {
        ApiClient::new(&self.config())
    }

    pub fn set_products(&self, products: Vec<Value>) {
        lock(&self.state).products = products;
    }

    pub fn set_categories(&self, categories: Vec<Value>) {
        lock(&self.state).categories = categories;
    }

    pub fn set_orders(&self, orders: Vec<Value>) {
        lock(&self.state).orders = orders;
    }

    /// Put a product summary on the server-side wishlist.
    pub fn wishlist_product(&self, product: &Value) {
        lock(&self.state).wishlist.push(summary(product));
    }

    /// Answer `method path` with a fixed JSON body instead of the default
    /// behaviour.
    pub fn script(&self, method: &str, path: &str, status: StatusCode, body: &Value) {
        self.script_raw(method, path, status, &body.to_string());
    }

    /// Answer `method path` with a fixed raw body.
    pub fn script_raw(&self, method: &str, path: &str, status: StatusCode, body: &str) {
        lock(&self.state).scripted.insert(
            (method.to_string(), path.to_string()),
            Scripted {
                status,
                body: body.to_string(),
                retry_after: None,
            },
        );
    }

    /// Answer `method path` with 429 and a `Retry-After` header.
    pub fn rate_limit(&self, method: &str, path: &str, retry_after: u64) {
        lock(&self.state).scripted.insert(
            (method.to_string(), path.to_string()),
            Scripted {
                status: StatusCode::TOO_MANY_REQUESTS,
                body: json!({ "message": "Too many requests" }).to_string(),
                retry_after: Some(retry_after),
            },
        );
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state).requests.clone()
    }

    /// How many times `method path` was requested.
    #[must_use]
    pub fn hits(&self, method: &str, path: &str) -> usize {
        lock(&self.state)
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Server-side cart lines.
    #[must_use]
    pub fn cart_lines(&self) -> Vec<Value> {
        lock(&self.state).cart.clone()
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// A product record in the backend's shape.
#[must_use]
pub fn product_json(
    id: &str,
    name: &str,
    price: Value,
    category: &str,
    sizes: &[&str],
    colors: &[&str],
    created_at: &str,
) -> Value {
    json!({
        "_id": id,
        "name": name,
        "price": price,
        "category": category,
        "sizes": sizes,
        "colors": colors,
        "createdAt": created_at,
        "imageUrl": format!("https://cdn.example.com/{id}.jpg"),
    })
}

#[must_use]
pub fn category_json(id: &str, name: &str) -> Value {
    json!({ "_id": id, "name": name })
}

/// A small catalog: two categories, four products.
#[must_use]
pub fn sample_catalog() -> (Vec<Value>, Vec<Value>) {
    let categories = vec![category_json("c1", "Kurtas"), category_json("c2", "Sarees")];
    let products = vec![
        product_json("p1", "Linen Kurta", json!(1200), "c1", &["S", "M"], &["White", "Navy"], "2024-01-01T00:00:00Z"),
        product_json("p2", "Silk Saree", json!(8500), "c2", &[], &[], "2024-02-01T00:00:00Z"),
        product_json("p3", "Cotton Kurta", json!("650"), "c1", &["m", "L"], &["Red"], "2024-03-01T00:00:00Z"),
        product_json("p4", "Festive Saree", json!(15000), "c2", &["Free"], &["Red"], "2024-04-01T00:00:00Z"),
    ];
    (products, categories)
}

// =============================================================================
// Handler
// =============================================================================

fn summary(product: &Value) -> Value {
    json!({
        "_id": product["_id"],
        "name": product["name"],
        "price": product["price"],
        "imageUrl": product["imageUrl"],
    })
}

fn reply(status: StatusCode, body: &Value) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        body.to_string(),
    )
        .into_response()
}

fn ok(body: &Value) -> Response {
    reply(StatusCode::OK, body)
}

fn cart_body(state: &BackendState) -> Response {
    let total: i64 = state
        .cart
        .iter()
        .map(|line| {
            let price = line["product"]["price"].as_i64().unwrap_or(0);
            price * line["quantity"].as_i64().unwrap_or(0)
        })
        .sum();
    ok(&json!({ "success": true, "items": state.cart, "total": total }))
}

fn wishlist_body(state: &BackendState) -> Response {
    ok(&json!({ "wishlist": { "products": state.wishlist } }))
}

fn find_product<'a>(state: &'a BackendState, id: &Value) -> Option<&'a Value> {
    state.products.iter().find(|p| &p["_id"] == id)
}

async fn handle(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix(PREFIX)
        .unwrap_or_else(|| uri.path())
        .to_string();
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let mut state = lock(&state);
    state.requests.push(RecordedRequest {
        method: method.as_str().to_string(),
        path: path.clone(),
        authorization: authorization.clone(),
        body: (!body.is_null()).then(|| body.clone()),
    });

    if let Some(scripted) = state
        .scripted
        .get(&(method.as_str().to_string(), path.clone()))
        .cloned()
    {
        let mut response = (
            scripted.status,
            [(header::CONTENT_TYPE, "application/json")],
            scripted.body,
        )
            .into_response();
        if let Some(secs) = scripted.retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        return response;
    }

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let signed_in = authorization.as_deref() == Some(format!("Bearer {TOKEN}").as_str());

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["product", "get-product"]) => ok(&json!({ "products": state.products })),
        ("GET", ["category", "get-category"]) => ok(&json!({ "categories": state.categories })),
        ("POST", ["contact"]) => contact(&body),
        (_, ["cart" | "wishlist" | "orders" | "order", ..]) if !signed_in => reply(
            StatusCode::UNAUTHORIZED,
            &json!({ "message": "Not authorized, token failed" }),
        ),

        ("GET", ["cart"]) => cart_body(&state),
        ("POST", ["cart"]) => {
            let Some(product) = find_product(&state, &body["productId"]).map(summary) else {
                return reply(
                    StatusCode::NOT_FOUND,
                    &json!({ "success": false, "message": "Product not found" }),
                );
            };
            state.next_line += 1;
            let line = json!({
                "_id": format!("line-{}", state.next_line),
                "product": product,
                "quantity": body["quantity"],
                "size": body["size"],
                "color": body["color"],
            });
            state.cart.push(line);
            cart_body(&state)
        }
        ("PUT", ["cart", id]) => {
            let quantity = body["quantity"].as_u64().unwrap_or(0);
            let Some(index) = state.cart.iter().position(|line| line["_id"] == *id) else {
                return reply(
                    StatusCode::NOT_FOUND,
                    &json!({ "success": false, "message": "Item not found in cart" }),
                );
            };
            if quantity == 0 {
                state.cart.remove(index);
            } else if let Some(line) = state.cart.get_mut(index) {
                line["quantity"] = json!(quantity);
            }
            cart_body(&state)
        }
        ("DELETE", ["cart", id]) => {
            state.cart.retain(|line| line["_id"] != *id);
            cart_body(&state)
        }
        ("DELETE", ["cart"]) => {
            state.cart.clear();
            ok(&json!({ "success": true, "message": "Cart cleared", "items": [], "total": 0 }))
        }

        ("GET", ["wishlist"]) => wishlist_body(&state),
        ("POST", ["wishlist"]) => {
            let Some(product) = find_product(&state, &body["productId"]).map(summary) else {
                return reply(StatusCode::NOT_FOUND, &json!({ "message": "Product not found" }));
            };
            if !state.wishlist.iter().any(|p| p["_id"] == product["_id"]) {
                state.wishlist.push(product);
            }
            wishlist_body(&state)
        }
        ("DELETE", ["wishlist", id]) => {
            state.wishlist.retain(|p| p["_id"] != *id);
            wishlist_body(&state)
        }

        ("GET", ["orders", "my-orders"]) => ok(&json!({ "success": true, "orders": state.orders })),
        ("POST", ["order", "confirm-payment", _]) => {
            if body["paymentStatus"] == "Paid" {
                ok(&json!({ "success": true, "message": "Payment confirmed" }))
            } else {
                reply(
                    StatusCode::BAD_REQUEST,
                    &json!({ "success": false, "message": "Invalid payment status" }),
                )
            }
        }

        _ => reply(StatusCode::NOT_FOUND, &json!({ "message": "Route not found" })),
    }
}

fn contact(body: &Value) -> Response {
    let filled = |key: &str| body[key].as_str().is_some_and(|v| !v.trim().is_empty());
    if filled("name") && filled("email") && filled("message") {
        ok(&json!({ "message": "Thank you for contacting us! We will get back to you soon." }))
    } else {
        reply(
            StatusCode::BAD_REQUEST,
            &json!({ "error": "Name, email and message are required" }),
        )
    }
}
