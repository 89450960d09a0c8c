//! Domain models for the storefront.
//!
//! These are the values the stores persist and the renderer reads. None of
//! them perform I/O themselves except [`Session`], which reads and writes its
//! own pointer key.

pub mod cart;
pub mod pending;
pub mod product;
pub mod session;

pub use cart::{LineItem, cart_total, coerce_quantity};
pub use pending::PendingAction;
pub use product::Product;
pub use session::Session;
