//! Order history.

use std::io::Write;

use loomi_storefront::ApiError;

use super::{CommandError, Context};
use crate::render;

/// `loomi orders`
pub async fn list(ctx: &Context, out: &mut impl Write) -> Result<(), CommandError> {
    let token = ctx
        .config
        .auth_token
        .as_ref()
        .ok_or(ApiError::Unauthenticated)?;
    let orders = ctx.client.my_orders(token).await?;
    render::orders(out, &orders)?;
    Ok(())
}
