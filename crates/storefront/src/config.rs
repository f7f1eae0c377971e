//! Storefront client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `LOOMI_API_BASE_URL` - Backend API base URL
//!   (default: `https://loomibackend.onrender.com/api/v1`)
//! - `LOOMI_AUTH_TOKEN` - Bearer token for cart, wishlist and order calls
//! - `LOOMI_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `LOOMI_CATALOG_TTL_SECS` - Catalog response cache TTL (default: 300)
//! - `LOOMI_PAGE_SIZE` - Products per listing page (default: 9)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::num::NonZeroUsize;
use std::time::Duration;

use loomi_core::catalog::DEFAULT_PAGE_SIZE;
use thiserror::Error;
use url::Url;

use crate::session::AuthToken;

/// Default backend location.
pub const DEFAULT_API_BASE_URL: &str = "https://loomibackend.onrender.com/api/v1";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CATALOG_TTL_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Backend API base URL, without a trailing slash.
    pub api_base_url: Url,
    /// Bearer token for authenticated endpoints.
    pub auth_token: Option<AuthToken>,
    /// Per-request timeout.
    pub http_timeout: Duration,
    /// How long product and category responses stay cached.
    pub catalog_ttl: Duration,
    /// Products per listing page.
    pub page_size: NonZeroUsize,
    /// Sentry DSN for error tracking.
    pub sentry_dsn: Option<String>,
    /// Sentry environment name.
    pub sentry_environment: Option<String>,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("api_base_url", &self.api_base_url.as_str())
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("http_timeout", &self.http_timeout)
            .field("catalog_ttl", &self.catalog_ttl)
            .field("page_size", &self.page_size)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .finish()
    }
}

impl StorefrontConfig {
    /// Configuration for `api_base_url` with every other setting at its default.
    #[must_use]
    pub const fn new(api_base_url: Url) -> Self {
        Self {
            api_base_url,
            auth_token: None,
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            catalog_ttl: Duration::from_secs(DEFAULT_CATALOG_TTL_SECS),
            page_size: DEFAULT_PAGE_SIZE,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = parse_base_url(
            "LOOMI_API_BASE_URL",
            &get_env_or_default("LOOMI_API_BASE_URL", DEFAULT_API_BASE_URL),
        )?;
        let auth_token = get_optional_env("LOOMI_AUTH_TOKEN")
            .map(|raw| parse_token("LOOMI_AUTH_TOKEN", &raw))
            .transpose()?;
        let http_timeout = Duration::from_secs(get_parsed_or_default(
            "LOOMI_HTTP_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        )?);
        let catalog_ttl = Duration::from_secs(get_parsed_or_default(
            "LOOMI_CATALOG_TTL_SECS",
            DEFAULT_CATALOG_TTL_SECS,
        )?);
        let page_size = get_parsed_or_default("LOOMI_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;

        Ok(Self {
            api_base_url,
            auth_token,
            http_timeout,
            catalog_ttl,
            page_size,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Replace the base URL, e.g. from a command-line flag.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL is not an absolute http(s) URL.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_base_url = parse_base_url("--api-url", raw)?;
        Ok(self)
    }

    /// Replace the auth token, e.g. from a command-line flag.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the token is blank or contains whitespace.
    pub fn with_token(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.auth_token = Some(parse_token("--token", raw)?);
        Ok(self)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Blank values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn get_parsed_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse and normalise an API base URL.
fn parse_base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim().trim_end_matches('/'))
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be an absolute URL with a host".to_string(),
        ));
    }
    Ok(url)
}

fn parse_token(key: &str, raw: &str) -> Result<AuthToken, ConfigError> {
    AuthToken::new(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> StorefrontConfig {
        StorefrontConfig::new(parse_base_url("TEST", DEFAULT_API_BASE_URL).unwrap())
    }

    #[test]
    fn test_defaults() {
        let config = config();
        assert_eq!(config.api_base_url.as_str(), DEFAULT_API_BASE_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.catalog_ttl, Duration::from_secs(300));
        assert_eq!(config.page_size.get(), 9);
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn test_parse_base_url_trims_trailing_slash() {
        let url = parse_base_url("TEST", "http://127.0.0.1:5050/api/v1/").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5050/api/v1");
    }

    #[test]
    fn test_parse_base_url_rejects_bad_input() {
        assert!(matches!(
            parse_base_url("TEST", "ftp://example.com"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(parse_base_url("TEST", "not a url").is_err());
        assert!(parse_base_url("TEST", "mailto:shop@example.com").is_err());
    }

    #[test]
    fn test_overrides() {
        let overridden = config()
            .with_base_url("http://localhost:5050/api/v1")
            .unwrap()
            .with_token("abc123")
            .unwrap();
        assert_eq!(overridden.api_base_url.as_str(), "http://localhost:5050/api/v1");
        assert!(overridden.auth_token.is_some());
        assert!(config().with_token("a b").is_err());
    }

    #[test]
    fn test_config_debug_redacts_secrets() {
        let mut config = config()
            .with_token("super_secret_token_value")
            .unwrap();
        config.sentry_dsn = Some("https://key@sentry.example/1".to_string());

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("loomibackend.onrender.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token_value"));
        assert!(!debug_output.contains("key@sentry"));
    }
}
