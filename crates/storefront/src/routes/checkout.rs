//! Checkout route handlers.
//!
//! Checkout is a demo: placing an order only empties the cart.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use serde::Deserialize;
use tracing::instrument;

use pocket_shop_core::format_amount;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireShopper;
use crate::routes::render_header;
use crate::services::CartStore;

/// Checkout form data. Nothing is stored or charged.
#[derive(Deserialize)]
pub struct CheckoutForm {
    pub name: String,
    pub address: String,
    pub card: String,
}

impl CheckoutForm {
    fn is_complete(&self) -> bool {
        [&self.name, &self.address, &self.card]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Checkout form page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub header_html: String,
    pub total: String,
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "order_placed.html")]
pub struct OrderPlacedTemplate {
    pub header_html: String,
}

/// Display the checkout form.
#[instrument(skip_all)]
pub async fn show(shopper: RequireShopper) -> Result<CheckoutTemplate> {
    let RequireShopper { mut storage, .. } = shopper;
    let total = CartStore::new(storage.store_mut()).total();

    Ok(CheckoutTemplate {
        header_html: render_header(&mut storage)?,
        total: format_amount(total),
    })
}

/// Place the demo order: empty the cart and show the confirmation.
#[instrument(skip_all)]
pub async fn place_order(shopper: RequireShopper, Form(form): Form<CheckoutForm>) -> Result<OrderPlacedTemplate> {
    if !form.is_complete() {
        return Err(AppError::BadRequest(
            "name, address and card are required".to_string(),
        ));
    }

    let RequireShopper { mut storage, email } = shopper;
    CartStore::new(storage.store_mut()).clear();
    let header_html = render_header(&mut storage)?;
    storage.commit().await?;

    add_breadcrumb("checkout", "Order placed", None);
    tracing::info!(email = %email, "Demo order placed");

    Ok(OrderPlacedTemplate { header_html })
}
