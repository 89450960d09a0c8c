//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Credential store: signup, login, logout over the storage scope
//! - `cart` - Cart store: line items, totals, deferred add-to-cart
//!
//! Services borrow the storage scope mutably for the duration of one
//! operation and receive the [`crate::models::Session`] explicitly.

pub mod auth;
pub mod cart;

pub use auth::{AuthError, CredentialStore};
pub use cart::{AddOutcome, CartStore};
