//! Client-side state stores.
//!
//! Each store is an owned value built from an [`ApiClient`](crate::ApiClient)
//! and, where the backend needs it, an optional [`AuthToken`](crate::AuthToken).
//! Mutations are round trips: local state is replaced with the server's answer
//! on success and left untouched on failure. Without a token nothing reaches
//! the network.

mod cart;
mod catalog;
mod checkout;
mod wishlist;

pub use cart::CartStore;
pub use catalog::{CatalogState, CatalogStore, LoadTicket};
pub use checkout::{CheckoutOutcome, PaymentOutcome, complete_checkout};
pub use wishlist::WishlistStore;
