//! Plain-text rendering of listings, carts and orders.

use std::io::{self, Write};

use loomi_core::catalog::{Catalog, DisplayPage, Listing, ShopQuery, category_counts};
use loomi_core::color::is_light_color;
use loomi_core::price::display_optional;
use loomi_core::{Cart, Order, OrderStatus, ProductSummary};
use loomi_storefront::store::{CheckoutOutcome, PaymentOutcome};

/// Render one page of the shop listing with its facets.
pub fn listing(out: &mut impl Write, listing: &Listing, page: &DisplayPage<'_>) -> io::Result<()> {
    if page.items.is_empty() {
        writeln!(out, "No products match your filters.")?;
    } else {
        writeln!(
            out,
            "Showing page {} of {} ({} products, sorted by {})",
            page.number,
            page.total_pages,
            page.total_count,
            listing.sort()
        )?;
        for product in &page.items {
            writeln!(
                out,
                "  {:<24} {:>14}  {}",
                product.id,
                display_optional(product.price),
                product.name
            )?;
        }
    }

    let filter = listing.filter();

    writeln!(out)?;
    writeln!(out, "Categories:")?;
    for entry in &page.category_counts {
        let mark = if filter.categories.contains(&entry.category.name) { "x" } else { " " };
        writeln!(out, "  [{mark}] {} ({})", entry.category.name, entry.count)?;
    }

    if !page.sizes.is_empty() {
        let sizes: Vec<String> = page
            .sizes
            .iter()
            .map(|size| {
                if filter.sizes.contains(size) {
                    format!("[{size}]")
                } else {
                    size.clone()
                }
            })
            .collect();
        writeln!(out, "Sizes: {}", sizes.join(" "))?;
    }

    if !page.colors.is_empty() {
        writeln!(out, "Colors:")?;
        for color in &page.colors {
            let mark = if filter.colors.contains(color) { "x" } else { " " };
            // Checkmark contrast for the swatch
            let tone = if is_light_color(color) { "light" } else { "dark" };
            writeln!(out, "  [{mark}] {color} ({tone})")?;
        }
    }

    if page.page_links.len() > 1 {
        writeln!(out, "Pages: {}", page_links(&page.page_links, page.number))?;
    }

    let query = ShopQuery::from_listing(listing).to_query_string();
    if !query.is_empty() {
        writeln!(out, "Link: /shop?{query}")?;
    }
    Ok(())
}

fn page_links(links: &[Option<usize>], current: usize) -> String {
    links
        .iter()
        .map(|link| match link {
            Some(n) if *n == current => format!("[{n}]"),
            Some(n) => n.to_string(),
            None => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn categories(out: &mut impl Write, catalog: &Catalog) -> io::Result<()> {
    if catalog.categories().is_empty() {
        return writeln!(out, "No categories.");
    }
    for entry in category_counts(catalog) {
        writeln!(
            out,
            "  {:<24} {} ({})",
            entry.category.id, entry.category.name, entry.count
        )?;
    }
    Ok(())
}

pub fn cart(out: &mut impl Write, cart: &Cart) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Your cart is empty.");
    }
    for item in &cart.items {
        let name = item
            .product
            .as_ref()
            .map_or("(product unavailable)", |p| p.name.as_str());
        let variant = [item.size.as_deref(), item.color.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" / ");
        writeln!(
            out,
            "  {:<24} {} x{} [{}] {}",
            item.id,
            name,
            item.quantity,
            variant,
            display_optional(item.line_total())
        )?;
    }
    writeln!(
        out,
        "{} items, total {}",
        cart.item_count(),
        cart.total.display_inr()
    )
}

pub fn wishlist(out: &mut impl Write, products: &[ProductSummary]) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "Your wishlist is empty.");
    }
    for product in products {
        writeln!(
            out,
            "  {:<24} {:>14}  {}",
            product.id,
            display_optional(product.price),
            product.name
        )?;
    }
    Ok(())
}

pub fn orders(out: &mut impl Write, orders: &[Order]) -> io::Result<()> {
    if orders.is_empty() {
        return writeln!(out, "You have no orders yet.");
    }
    for order in orders {
        writeln!(
            out,
            "Order {} placed {} - {} - {}",
            order.id,
            order.created_at.format("%d %b %Y"),
            order.total_amount.display_inr(),
            order.payment_label()
        )?;
        writeln!(out, "  {}", progress(&order.status))?;
        for item in &order.items {
            let name = item
                .product
                .as_ref()
                .map_or("(product unavailable)", |p| p.name.as_str());
            writeln!(out, "    {name} x{}", item.quantity)?;
        }
    }
    Ok(())
}

/// Delivery progress line, e.g. `[x] Ordered -> [x] Shipped -> [ ] ...`.
fn progress(status: &OrderStatus) -> String {
    if status.step_index().is_none() {
        return format!("Status: {}", status.label());
    }
    OrderStatus::STEPS
        .iter()
        .enumerate()
        .map(|(idx, step)| {
            let mark = if status.reached(idx) { "x" } else { " " };
            format!("[{mark}] {}", step.label())
        })
        .collect::<Vec<_>>()
        .join(" -> ")
}

pub fn checkout(out: &mut impl Write, outcome: &CheckoutOutcome) -> io::Result<()> {
    writeln!(
        out,
        "Order {} ({})",
        outcome.order_id, outcome.payment_method
    )?;
    if let PaymentOutcome::Confirmed(message) = &outcome.payment {
        writeln!(out, "{}", message.as_deref().unwrap_or("Payment confirmed."))?;
    }
    for notice in outcome.notices() {
        writeln!(out, "{notice}")?;
    }
    if outcome.is_complete() {
        writeln!(out, "Thank you for your order!")?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use loomi_core::{
        CartItem, CartItemId, Category, CategoryId, OrderId, OrderItem, Price, Product, ProductId,
    };

    use super::*;

    fn text(render: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        render(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn product(id: &str, price: i64, category: &str, colors: &[&str]) -> Product {
        Product {
            id: ProductId::parse(id).unwrap(),
            name: format!("Product {id}"),
            price: Some(Price::from_units(price)),
            category: CategoryId::parse(category).unwrap(),
            sizes: vec!["m".to_string()],
            colors: colors.iter().map(|c| (*c).to_string()).collect(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            image_url: None,
            images: Vec::new(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                product("p1", 1500, "c1", &["white"]),
                product("p2", 250_000, "c2", &["navy"]),
            ],
            vec![
                Category {
                    id: CategoryId::parse("c1").unwrap(),
                    name: "Kurtas".to_string(),
                },
                Category {
                    id: CategoryId::parse("c2").unwrap(),
                    name: "Sarees".to_string(),
                },
            ],
        )
    }

    #[test]
    fn test_listing_shows_facets_and_link() {
        let catalog = catalog();
        let query = ShopQuery::parse("category=Kurtas");
        let listing = Listing::from_query(&query, &catalog);
        let page = listing.display_page(&catalog);

        let out = text(|buf| super::listing(buf, &listing, &page));
        assert!(out.contains("Showing page 1 of 1 (1 products"));
        assert!(out.contains("₹1,500.00"));
        assert!(out.contains("[x] Kurtas (1)"));
        assert!(out.contains("[ ] Sarees (1)"));
        assert!(out.contains("Sizes: M"));
        assert!(out.contains("white (light)"));
        assert!(out.contains("navy (dark)"));
        assert!(out.contains("Link: /shop?category=Kurtas"));
    }

    #[test]
    fn test_page_links_mark_current_and_gaps() {
        assert_eq!(
            page_links(&[Some(1), Some(2), None, Some(9)], 2),
            "1 [2] ... 9"
        );
    }

    #[test]
    fn test_cart_lines_and_total() {
        let cart = Cart {
            items: vec![CartItem {
                id: CartItemId::parse("line-1").unwrap(),
                product: Some(product("p1", 1500, "c1", &[]).summary()),
                quantity: 2,
                size: Some("M".to_string()),
                color: Some("Red".to_string()),
            }],
            total: Price::from_units(3000),
        };
        let out = text(|buf| super::cart(buf, &cart));
        assert!(out.contains("line-1"));
        assert!(out.contains("x2 [M / Red] ₹3,000.00"));
        assert!(out.contains("2 items, total ₹3,000.00"));

        assert_eq!(text(|buf| super::cart(buf, &Cart::empty())), "Your cart is empty.\n");
    }

    #[test]
    fn test_order_progress() {
        let order = Order {
            id: OrderId::parse("o1").unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap(),
            is_paid: true,
            total_amount: Price::from_units(123_456),
            status: OrderStatus::Shipped,
            items: vec![OrderItem {
                product: None,
                quantity: 1,
            }],
        };
        let out = text(|buf| super::orders(buf, &[order]));
        assert!(out.contains("05 Mar 2024"));
        assert!(out.contains("₹1,23,456.00"));
        assert!(out.contains("Payment Completed"));
        assert!(out.contains("[x] Ordered -> [x] Shipped -> [ ] Out for Delivery -> [ ] Delivered"));
        assert!(out.contains("(product unavailable) x1"));
    }

    #[test]
    fn test_unknown_status_is_shown_verbatim() {
        assert_eq!(
            progress(&OrderStatus::Other("Returned".to_string())),
            "Status: Returned"
        );
    }
}
