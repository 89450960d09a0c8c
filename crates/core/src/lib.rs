//! Pocket Shop Core - Shared types library.
//!
//! This crate provides common types used across all Pocket Shop components:
//! - `storefront` - Browser-facing demo shop (listing, detail, cart, auth)
//! - `cli` - Command-line shopper working against a file-backed store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, emails, and categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
