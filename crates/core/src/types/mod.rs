//! Core types for Loomi.
//!
//! This module provides type-safe wrappers for the records exchanged with the
//! storefront backend. Every record validates its required fields during
//! deserialization, so a malformed payload is rejected at the boundary instead
//! of surfacing as half-filled data further in.

pub mod cart;
pub mod contact;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod status;

pub use cart::{Cart, CartItem, CartSelection, DEFAULT_COLOR, ONE_SIZE};
pub use contact::ContactForm;
pub use id::*;
pub use order::{Order, OrderItem};
pub use price::{Price, PriceRange};
pub use product::{Category, Product, ProductImage, ProductSummary};
pub use status::{OrderStatus, PaymentMethod};
