//! Bearer token for authenticated calls.
//!
//! Token issuance happens elsewhere; this crate only carries the token and
//! attaches it as `Authorization: Bearer <token>`.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Rejected token input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("auth token is empty")]
    Empty,
    #[error("auth token must not contain whitespace")]
    Whitespace,
}

/// A bearer token. Never printed.
#[derive(Clone)]
pub struct AuthToken(SecretString);

impl AuthToken {
    /// Wrap a raw token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] if the token is blank or contains whitespace.
    pub fn new(raw: impl Into<String>) -> Result<Self, TokenError> {
        let raw: String = raw.into();
        if raw.is_empty() {
            return Err(TokenError::Empty);
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(TokenError::Whitespace);
        }
        Ok(Self(SecretString::from(raw)))
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken([REDACTED])")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_token_validation() {
        assert_eq!(AuthToken::new("").unwrap_err(), TokenError::Empty);
        assert_eq!(AuthToken::new("abc def").unwrap_err(), TokenError::Whitespace);
        assert_eq!(AuthToken::new("abc.def").unwrap().expose(), "abc.def");
    }

    #[test]
    fn test_debug_redacts() {
        let token = AuthToken::new("eyJhbGciOi.secret").unwrap();
        let debug = format!("{token:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret"));
    }
}
