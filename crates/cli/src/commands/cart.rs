//! Cart commands.

use std::io::Write;

use loomi_core::{CartItemId, ProductId};
use loomi_storefront::ApiError;
use loomi_storefront::error::add_breadcrumb;
use loomi_storefront::store::{CartStore, CatalogStore};

use super::{CommandError, Context};
use crate::render;

fn store(ctx: &Context) -> CartStore {
    CartStore::new(ctx.client.clone(), ctx.config.auth_token.clone())
}

/// `loomi cart`
pub async fn show(ctx: &Context, out: &mut impl Write) -> Result<(), CommandError> {
    let mut cart = store(ctx);
    if !cart.is_signed_in() {
        return Err(ApiError::Unauthenticated.into());
    }
    render::cart(out, cart.refresh().await?)?;
    Ok(())
}

/// `loomi cart add`
///
/// The product is looked up in the catalog so its sizes and colours can be
/// checked before anything is sent.
pub async fn add(
    ctx: &Context,
    product_id: &ProductId,
    quantity: u32,
    size: Option<&str>,
    color: Option<&str>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let mut cart = store(ctx);
    if !cart.is_signed_in() {
        return Err(ApiError::Unauthenticated.into());
    }

    let mut catalog = CatalogStore::new();
    let product = catalog
        .load(&ctx.client)
        .await?
        .product(product_id.as_str())
        .ok_or_else(|| CommandError::UnknownProduct(product_id.to_string()))?;

    let updated = cart.add(product, quantity, size, color).await?;
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));
    writeln!(out, "Added {} to your cart.", product.name)?;
    render::cart(out, updated)?;
    Ok(())
}

/// `loomi cart update`
pub async fn update(
    ctx: &Context,
    item_id: &CartItemId,
    quantity: i64,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let mut cart = store(ctx);
    render::cart(out, cart.update(item_id, quantity).await?)?;
    Ok(())
}

/// `loomi cart remove`
pub async fn remove(
    ctx: &Context,
    item_id: &CartItemId,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let mut cart = store(ctx);
    let updated = cart.remove(item_id).await?;
    writeln!(out, "Item removed.")?;
    render::cart(out, updated)?;
    Ok(())
}

/// `loomi cart clear`
pub async fn clear(ctx: &Context, out: &mut impl Write) -> Result<(), CommandError> {
    let mut cart = store(ctx);
    render::cart(out, cart.clear().await?)?;
    Ok(())
}
