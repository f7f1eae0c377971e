//! Newtype IDs for type-safe entity references.
//!
//! The backend keys every document with an opaque string (`_id`). Use the
//! `define_id!` macro to create wrappers that prevent accidentally mixing IDs
//! from different entity types, such as passing a cart line ID where a product
//! ID is expected.

use thiserror::Error;

/// Error returned when an identifier is blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("identifier cannot be empty")]
pub struct EmptyIdError;

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` as a bare string, rejecting blank values
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `parse()`, `as_str()`, `into_inner()`
/// - `Display`, `FromStr` and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use loomi_core::define_id;
/// define_id!(UserId);
/// define_id!(OrderRef);
///
/// let user_id = UserId::parse("64f0c2").unwrap();
/// let order = OrderRef::parse("64f0c2").unwrap();
///
/// // These are different types, so this won't compile:
/// // let _: UserId = order;
/// # let _ = (user_id, order);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse an ID, rejecting blank input.
            ///
            /// # Errors
            ///
            /// Returns [`EmptyIdError`]($crate::types::id::EmptyIdError) if the
            /// input is empty or whitespace only.
            pub fn parse(
                id: impl Into<String>,
            ) -> ::core::result::Result<Self, $crate::types::id::EmptyIdError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err($crate::types::id::EmptyIdError);
                }
                Ok(Self(id))
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::EmptyIdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::types::id::EmptyIdError;

            fn try_from(id: String) -> ::core::result::Result<Self, Self::Error> {
                Self::parse(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(CategoryId);
define_id!(CartItemId);
define_id!(OrderId);
