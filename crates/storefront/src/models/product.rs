//! Catalog product.

use serde::Serialize;

use pocket_shop_core::{Category, Price, ProductId};

/// A product offered by the shop.
///
/// Products are defined when the catalog is built and never change
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    /// Stable identifier used in URLs and cart rows.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Category used by the listing filter.
    pub category: Category,
    /// Short description, also searched by the listing filter.
    pub description: String,
    /// Image URL.
    pub image_url: String,
}

impl Product {
    /// Whether `needle` (already lowercased) occurs in the name or description,
    /// ignoring case.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}
