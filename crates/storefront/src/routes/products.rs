//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use pocket_shop_core::Category;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::BrowserStorage;
use crate::routes::render_header;
use crate::state::AppState;
use crate::views::{self, CategoryOption};

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

impl ListingQuery {
    /// The selected category. Empty means all; an unknown value also means
    /// all, since the filter form never sends one.
    fn category(&self) -> Option<Category> {
        let raw = self.category.as_deref().map(str::trim).filter(|c| !c.is_empty())?;
        match raw.parse() {
            Ok(category) => Some(category),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unknown category filter");
                None
            }
        }
    }
}

/// Detail query parameters.
#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub id: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products.html")]
pub struct ProductsTemplate {
    pub header_html: String,
    pub search: String,
    pub categories: Vec<CategoryOption>,
    pub listing_html: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "product.html")]
pub struct ProductTemplate {
    pub header_html: String,
    pub name: String,
    pub detail_html: String,
}

/// Display the product listing, filtered by search text and category.
#[instrument(skip(state, storage))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
    mut storage: BrowserStorage,
) -> Result<ProductsTemplate> {
    let category = query.category();
    let search = query.q.unwrap_or_default();

    Ok(ProductsTemplate {
        header_html: render_header(&mut storage)?,
        listing_html: views::render_listing(state.catalog(), &search, category).render()?,
        categories: views::category_options(category),
        search,
    })
}

/// Display a product with related products.
#[instrument(skip(state, storage))]
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<DetailQuery>,
    mut storage: BrowserStorage,
) -> Result<ProductTemplate> {
    let detail = views::render_detail(state.catalog(), query.id.as_deref())
        .ok_or_else(|| AppError::NotFound("catalog is empty".to_string()))?;

    Ok(ProductTemplate {
        header_html: render_header(&mut storage)?,
        name: detail.product.name.clone(),
        detail_html: detail.render()?,
    })
}
