//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::BrowserStorage;
use crate::routes::render_header;
use crate::state::AppState;
use crate::views;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub header_html: String,
    pub preview_html: String,
}

/// Display the home page.
#[instrument(skip(state, storage))]
pub async fn home(State(state): State<AppState>, mut storage: BrowserStorage) -> Result<HomeTemplate> {
    Ok(HomeTemplate {
        header_html: render_header(&mut storage)?,
        preview_html: views::render_preview(state.catalog()).render()?,
    })
}
