//! Contact form.

use std::io::Write;

use loomi_core::ContactForm;

use super::{CommandError, Context};

/// `loomi contact`
pub async fn send(
    ctx: &Context,
    name: &str,
    email: &str,
    phone: Option<&str>,
    message: &str,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let form = ContactForm::new(name, email, phone, message)?;
    let reply = ctx.client.send_contact(&form).await?;
    writeln!(out, "{reply}")?;
    Ok(())
}
