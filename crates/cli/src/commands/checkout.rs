//! Checkout completion.

use std::io::Write;

use loomi_core::{OrderId, PaymentMethod};
use loomi_storefront::store::{CartStore, complete_checkout};

use super::{CommandError, Context};
use crate::render;

/// `loomi complete-checkout`
pub async fn complete(
    ctx: &Context,
    order_id: &OrderId,
    payment: PaymentMethod,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let mut cart = CartStore::new(ctx.client.clone(), ctx.config.auth_token.clone());
    let outcome = complete_checkout(&mut cart, order_id, payment).await?;
    render::checkout(out, &outcome)?;
    Ok(())
}
