//! Contact form submission.

use loomi_core::ContactForm;
use reqwest::Method;
use tracing::{info, instrument};

use super::ApiClient;
use super::wire::ContactResponse;
use crate::error::ApiError;

/// Shown when the backend accepts the message without saying anything.
const DEFAULT_CONTACT_REPLY: &str = "Thank you for contacting us";

impl ApiClient {
    /// Send the contact form. Returns the backend's confirmation message.
    ///
    /// The form is validated before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed form, or an error if the
    /// request fails. Backend `{ error }` bodies surface as the error message.
    #[instrument(skip(self, form))]
    pub async fn send_contact(&self, form: &ContactForm) -> Result<String, ApiError> {
        form.validate()?;
        let request = self.request(Method::POST, &["contact"], None)?.json(form);
        let response: ContactResponse = self.execute(request).await?;
        info!("Contact message sent");
        Ok(response
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONTACT_REPLY.to_string()))
    }
}
