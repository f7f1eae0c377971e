//! Wishlist commands.

use std::io::Write;

use loomi_core::ProductId;
use loomi_storefront::ApiError;
use loomi_storefront::store::WishlistStore;

use super::{CommandError, Context};
use crate::render;

fn store(ctx: &Context) -> WishlistStore {
    WishlistStore::new(ctx.client.clone(), ctx.config.auth_token.clone())
}

/// `loomi wishlist`
pub async fn show(ctx: &Context, out: &mut impl Write) -> Result<(), CommandError> {
    if ctx.config.auth_token.is_none() {
        return Err(ApiError::Unauthenticated.into());
    }
    let mut wishlist = store(ctx);
    render::wishlist(out, wishlist.refresh().await?)?;
    Ok(())
}

/// `loomi wishlist add`
///
/// The current wishlist is fetched first so a duplicate add sends nothing.
pub async fn add(
    ctx: &Context,
    product_id: &ProductId,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let mut wishlist = store(ctx);
    if ctx.config.auth_token.is_some() {
        wishlist.refresh().await?;
    }
    if wishlist.add(product_id).await? {
        writeln!(out, "Added to your wishlist.")?;
    } else {
        writeln!(out, "Already in your wishlist.")?;
    }
    render::wishlist(out, wishlist.products())?;
    Ok(())
}

/// `loomi wishlist remove`
pub async fn remove(
    ctx: &Context,
    product_id: &ProductId,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let mut wishlist = store(ctx);
    let products = wishlist.remove(product_id).await?;
    writeln!(out, "Removed from your wishlist.")?;
    render::wishlist(out, products)?;
    Ok(())
}
