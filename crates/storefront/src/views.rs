//! View renderer.
//!
//! Pure functions from catalog and store state to HTML fragments. Each
//! renderer builds an askama template value; nothing here reads or writes
//! storage, so rendering the same state twice yields the same markup.
//!
//! Page handlers render these fragments to strings and embed them in full
//! page templates, re-rendering after every mutation that could change them.

use askama::Template;

use pocket_shop_core::{Category, format_amount};

use crate::catalog::Catalog;
use crate::models::{LineItem, Product, Session, cart_total};

/// Image shown for cart rows whose product is no longer in the catalog.
pub const FALLBACK_THUMBNAIL: &str = "https://via.placeholder.com/80";

/// Product card display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub href: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image_url: product.image_url.clone(),
            href: product_href(product.id.as_str()),
        }
    }
}

/// Cart row display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    /// Position in the cart, used by the update/remove forms.
    pub index: usize,
    pub name: String,
    pub price: String,
    pub quantity: u32,
    pub image_url: String,
}

/// Category option for the listing filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Link to a product detail page.
#[must_use]
pub fn product_href(id: &str) -> String {
    format!("/product?id={}", urlencoding::encode(id))
}

/// Filter dropdown options with `selected` marking the active category.
#[must_use]
pub fn category_options(selected: Option<Category>) -> Vec<CategoryOption> {
    Category::ALL
        .iter()
        .map(|c| CategoryOption {
            value: c.as_str(),
            label: c.label(),
            selected: selected == Some(*c),
        })
        .collect()
}

// =============================================================================
// Fragments
// =============================================================================

/// Home page preview grid.
#[derive(Template, Debug, Clone)]
#[template(path = "fragments/preview.html")]
pub struct PreviewFragment {
    pub products: Vec<ProductCardView>,
}

/// Product listing grid.
#[derive(Template, Debug, Clone)]
#[template(path = "fragments/listing.html")]
pub struct ListingFragment {
    pub products: Vec<ProductCardView>,
}

/// Product detail card with related products.
#[derive(Template, Debug, Clone)]
#[template(path = "fragments/detail.html")]
pub struct DetailFragment {
    pub product: ProductCardView,
    pub related: Vec<ProductCardView>,
}

/// Cart rows and summary.
#[derive(Template, Debug, Clone)]
#[template(path = "fragments/cart.html")]
pub struct CartFragment {
    pub lines: Vec<CartLineView>,
    pub total: String,
}

/// Header slot showing who is signed in.
#[derive(Template, Debug, Clone)]
#[template(path = "fragments/auth_header.html")]
pub struct AuthHeaderFragment {
    pub email: Option<String>,
    pub cart_count: u32,
}

// =============================================================================
// Renderers
// =============================================================================

/// First products of the catalog.
#[must_use]
pub fn render_preview(catalog: &Catalog) -> PreviewFragment {
    PreviewFragment {
        products: catalog.preview().iter().map(ProductCardView::from).collect(),
    }
}

/// Catalog filtered by search text and category.
#[must_use]
pub fn render_listing(catalog: &Catalog, search: &str, category: Option<Category>) -> ListingFragment {
    ListingFragment {
        products: catalog
            .filter(search, category)
            .into_iter()
            .map(ProductCardView::from)
            .collect(),
    }
}

/// Detail of the product with `id`.
///
/// A missing or unknown `id` shows the first catalog product instead.
/// Returns `None` only for an empty catalog.
#[must_use]
pub fn render_detail(catalog: &Catalog, id: Option<&str>) -> Option<DetailFragment> {
    let product = id
        .and_then(|id| catalog.find_by_id(id))
        .or_else(|| catalog.list().first())?;

    Some(DetailFragment {
        product: ProductCardView::from(product),
        related: catalog
            .related(&product.id)
            .into_iter()
            .map(ProductCardView::from)
            .collect(),
    })
}

/// Cart rows with the computed total.
#[must_use]
pub fn render_cart(lines: &[LineItem], catalog: &Catalog) -> CartFragment {
    let total = cart_total(lines);

    CartFragment {
        lines: lines
            .iter()
            .enumerate()
            .map(|(index, line)| CartLineView {
                index,
                name: line.name.clone(),
                price: line.price.to_string(),
                quantity: line.quantity,
                image_url: catalog
                    .find_by_id(line.product_id.as_str())
                    .map_or_else(|| FALLBACK_THUMBNAIL.to_owned(), |p| p.image_url.clone()),
            })
            .collect(),
        total: format_amount(total),
    }
}

/// Signed-in indicator with logout, or a login link.
#[must_use]
pub fn render_auth_header(session: &Session, cart_count: u32) -> AuthHeaderFragment {
    AuthHeaderFragment {
        email: session.current_user().map(ToString::to_string),
        cart_count,
    }
}
