//! Contact form submission.

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Maximum length of an email address (RFC 5321).
const MAX_EMAIL_LENGTH: usize = 254;

/// A contact form as posted to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    /// Build a trimmed, validated form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankField`] if the name or message is blank,
    /// or [`ValidationError::InvalidEmail`] if the email is not of the form
    /// `local@domain` within the RFC length limit.
    pub fn new(
        name: &str,
        email: &str,
        phone: Option<&str>,
        message: &str,
    ) -> Result<Self, ValidationError> {
        let form = Self {
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            phone: phone.map(str::trim).unwrap_or_default().to_string(),
            message: message.trim().to_string(),
        };
        form.validate()?;
        Ok(form)
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// See [`ContactForm::new`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankField("name"));
        }
        if self.message.trim().is_empty() {
            return Err(ValidationError::BlankField("message"));
        }
        if !is_plausible_email(&self.email) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_LENGTH || email.contains(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
