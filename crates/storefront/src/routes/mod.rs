//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (header + preview)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products?q=&category=  - Product listing
//! GET  /product?id=            - Product detail
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (or defer until login)
//! POST /cart/update            - Update quantity
//! POST /cart/remove            - Remove line
//!
//! # Checkout (requires login)
//! GET  /checkout               - Checkout form
//! POST /checkout               - Place the demo order
//!
//! # Auth
//! GET  /login                  - Login and signup forms
//! POST /login                  - Login action
//! POST /signup                 - Signup action
//! POST /logout                 - Logout action
//! ```
//!
//! Every page renders the auth header fresh from the shopper's storage
//! scope, so a page always reflects the latest mutation.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;

use askama::Template;
use axum::{
    Router,
    routing::{get, post},
};

use crate::error::Result;
use crate::middleware::BrowserStorage;
use crate::services::CartStore;
use crate::state::AppState;
use crate::views;

/// Render the auth header for the shopper's current state.
///
/// # Errors
///
/// Returns `AppError::Template` if rendering fails.
pub fn render_header(storage: &mut BrowserStorage) -> Result<String> {
    let session = storage.shopper();
    let cart_count = CartStore::new(storage.store_mut()).item_count();
    Ok(views::render_auth_header(&session, cart_count).render()?)
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog
        .route("/products", get(products::index))
        .route("/product", get(products::show))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", get(checkout::show).post(checkout::place_order))
        // Auth routes
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", post(auth::signup))
        .route("/logout", post(auth::logout))
}
