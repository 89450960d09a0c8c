//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with in-memory store)
//!
//! Extractors: [`BrowserStorage`] for the shopper's storage scope and
//! [`RequireShopper`] for routes that need a signed-in shopper.

pub mod auth;
pub mod request_id;
pub mod session;
pub mod storage;

pub use auth::{AuthRejection, RequireShopper};
pub use request_id::request_id_middleware;
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
pub use storage::BrowserStorage;
