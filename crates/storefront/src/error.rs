//! Error taxonomy with Sentry integration.
//!
//! Every client and store operation returns `Result<T, ApiError>`. Callers
//! turn the error into a transient notice with [`ApiError::notice`] and hand
//! it to [`ApiError::report`], which captures transport failures to Sentry and
//! leaves a breadcrumb for everything else.

use loomi_core::ValidationError;
use thiserror::Error;

/// Broad failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure, non-success HTTP status, unparseable body, rate limit.
    Transport,
    /// The backend answered `success: false`.
    Business,
    /// Caught locally before any network call.
    Validation,
}

/// Storefront client error.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// An endpoint URL could not be built.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// Backend answered `success: false`.
    #[error("Rejected: {0}")]
    Rejected(String),

    /// Resource not found locally (e.g. unknown product in the catalog).
    #[error("Not found: {0}")]
    NotFound(String),

    /// No auth token is available.
    #[error("Not logged in")]
    Unauthenticated,

    /// Local validation failure.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// The failure class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_)
            | Self::Api { .. }
            | Self::Parse(_)
            | Self::RateLimited(_)
            | Self::InvalidUrl(_) => ErrorKind::Transport,
            Self::Rejected(_) => ErrorKind::Business,
            Self::NotFound(_) | Self::Unauthenticated | Self::Validation(_) => {
                ErrorKind::Validation
            }
        }
    }

    /// Short message suitable for showing to the user.
    ///
    /// Transport details are not exposed; backend and validation messages
    /// are passed through.
    #[must_use]
    pub fn notice(&self) -> String {
        match self {
            Self::Http(_) | Self::InvalidUrl(_) => {
                "Could not reach the store. Please check your connection and try again."
                    .to_string()
            }
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            Self::Api { status, .. } => format!("The store returned an error ({status})."),
            Self::Parse(_) => "The store sent an unexpected response.".to_string(),
            Self::RateLimited(secs) => {
                format!("Too many requests. Please try again in {secs} seconds.")
            }
            Self::Rejected(message) | Self::NotFound(message) => message.clone(),
            Self::Unauthenticated => "Please log in to continue.".to_string(),
            Self::Validation(err) => err.to_string(),
        }
    }

    /// Record the error: transport failures go to Sentry, the rest become
    /// breadcrumbs.
    pub fn report(&self) {
        if self.kind() == ErrorKind::Transport {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront request failed"
            );
        } else {
            tracing::debug!(error = %self, "Storefront operation refused");
            add_breadcrumb("storefront", &self.notice(), None);
        }
    }
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "123")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
