//! Loomi Core - Shared types and the catalog engine.
//!
//! This crate provides the types used across all Loomi components:
//! - `storefront` - REST client and client-side state stores
//! - `cli` - Command-line storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Everything here is deterministic over its inputs, which keeps the
//! catalog engine trivially testable.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, products, carts, orders, contact forms
//! - [`catalog`] - Filter/sort/paginate engine over the fetched catalog
//! - [`color`] - Perceived-lightness heuristic for colour swatches
//! - [`validation`] - Local validation errors shared by all layers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod color;
pub mod types;
pub mod validation;

pub use types::*;
pub use validation::ValidationError;
