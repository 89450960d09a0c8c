//! Cart route handlers.
//!
//! Cart lines are addressed by their position, as rendered in the cart page's
//! update and remove forms. Every mutation redirects back to a page that
//! re-renders from storage.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, header},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::BrowserStorage;
use crate::routes::render_header;
use crate::services::{AddOutcome, CartStore};
use crate::state::AppState;
use crate::views;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: String,
}

/// Update quantity form data. `qty` is raw user input.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub index: usize,
    pub qty: String,
}

/// Remove line form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub index: usize,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub header_html: String,
    pub cart_html: String,
}

/// Display the cart page.
#[instrument(skip(state, storage))]
pub async fn show(State(state): State<AppState>, mut storage: BrowserStorage) -> Result<CartTemplate> {
    let lines = CartStore::new(storage.store_mut()).lines();

    Ok(CartTemplate {
        header_html: render_header(&mut storage)?,
        cart_html: views::render_cart(&lines, state.catalog()).render()?,
    })
}

/// Add one unit of a product.
///
/// Signed-out shoppers are sent to the login page; the add is saved and
/// replayed once they log in or sign up. Otherwise the shopper goes back to
/// the page they came from.
#[instrument(skip(state, storage, headers))]
pub async fn add(
    State(state): State<AppState>,
    mut storage: BrowserStorage,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let product = state
        .catalog()
        .find_by_id(form.id.trim())
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.id)))?;

    let session = storage.shopper();
    let outcome = CartStore::new(storage.store_mut()).add_item(
        &session,
        product.id.clone(),
        &product.name,
        product.price,
    )?;
    storage.commit().await?;

    match outcome {
        AddOutcome::Added(item) => {
            add_breadcrumb(
                "cart",
                "Added to cart",
                Some(&[("product_id", item.product_id.as_str())]),
            );
            let back = headers
                .get(header::REFERER)
                .and_then(|v| v.to_str().ok())
                .and_then(|referer| state.config().local_redirect(referer))
                .unwrap_or_else(|| "/cart".to_string());
            Ok(Redirect::to(&back))
        }
        AddOutcome::LoginRequired(_) => Ok(Redirect::to("/login")),
    }
}

/// Set a line's quantity.
#[instrument(skip(storage))]
pub async fn update(mut storage: BrowserStorage, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    match CartStore::new(storage.store_mut()).update_quantity(form.index, &form.qty)? {
        Some(quantity) => {
            tracing::debug!(index = form.index, quantity, "Cart quantity updated");
            storage.commit().await?;
        }
        None => tracing::debug!(index = form.index, "No cart line to update"),
    }

    Ok(Redirect::to("/cart"))
}

/// Remove a line.
#[instrument(skip(storage))]
pub async fn remove(mut storage: BrowserStorage, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    match CartStore::new(storage.store_mut()).remove_item(form.index)? {
        Some(line) => {
            tracing::debug!(product_id = %line.product_id, "Removed from cart");
            storage.commit().await?;
        }
        None => tracing::debug!(index = form.index, "No cart line to remove"),
    }

    Ok(Redirect::to("/cart"))
}
