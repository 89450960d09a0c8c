//! Static product catalog.
//!
//! The catalog is built once at startup and shared read-only. Queries return
//! products in catalog order.

use pocket_shop_core::{Category, Price, PriceError, ProductId};

use crate::models::Product;

/// Number of products shown in the home page preview.
pub const PREVIEW_SIZE: usize = 4;

/// Number of related products shown under a product detail.
pub const RELATED_SIZE: usize = 3;

/// Read-only product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an explicit product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The shop's built-in demo catalog.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if a built-in price is not positive, which would be
    /// a programming error in the table below.
    pub fn demo() -> Result<Self, PriceError> {
        let rows: [(&str, &str, u32, Category, &str, &str); 6] = [
            ("p1", "Cotton T-Shirt", 15, Category::Clothes, "Comfortable cotton tee.", "T-Shirt"),
            ("p2", "Bluetooth Headphones", 40, Category::Electronics, "Wireless audio device.", "Headphones"),
            ("p3", "Wooden Bowl", 25, Category::Handmade, "Handmade wooden bowl.", "Wooden+Bowl"),
            ("p4", "Denim Jacket", 45, Category::Clothes, "Stylish denim jacket.", "Denim+Jacket"),
            ("p5", "Smart Watch", 90, Category::Electronics, "Track your activity.", "Smart+Watch"),
            ("p6", "Handmade Vase", 30, Category::Handmade, "Decorative clay vase.", "Handmade+Vase"),
        ];

        let products = rows
            .into_iter()
            .map(|(id, name, dollars, category, description, image_text)| {
                Ok(Product {
                    id: ProductId::new(id),
                    name: name.to_owned(),
                    price: Price::from_dollars(dollars)?,
                    category,
                    description: description.to_owned(),
                    image_url: format!("https://via.placeholder.com/400x300?text={image_text}"),
                })
            })
            .collect::<Result<Vec<_>, PriceError>>()?;

        Ok(Self::new(products))
    }

    /// All products.
    #[must_use]
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Products matching both the search text and the category.
    ///
    /// `search` is trimmed and matched case-insensitively as a substring of
    /// the name or description; an empty search matches everything. A `None`
    /// category matches every category.
    #[must_use]
    pub fn filter(&self, search: &str, category: Option<Category>) -> Vec<&Product> {
        let needle = search.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .filter(|p| needle.is_empty() || p.matches_text(&needle))
            .collect()
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == *id)
    }

    /// The first products, for the home page.
    #[must_use]
    pub fn preview(&self) -> &[Product] {
        let end = self.products.len().min(PREVIEW_SIZE);
        self.products.get(..end).unwrap_or_default()
    }

    /// Up to three other products to show next to `id`.
    #[must_use]
    pub fn related(&self, id: &ProductId) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.id != *id)
            .take(RELATED_SIZE)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_demo_catalog() {
        let catalog = Catalog::demo().unwrap();
        assert_eq!(catalog.list().len(), 6);
        assert_eq!(catalog.list()[0].name, "Cotton T-Shirt");
    }

    #[test]
    fn test_filter_by_category_only() {
        let catalog = Catalog::demo().unwrap();
        let electronics = catalog.filter("", Some(Category::Electronics));
        assert_eq!(ids(&electronics), vec!["p2", "p5"]);
        assert!(electronics.iter().all(|p| p.category == Category::Electronics));
    }

    #[test]
    fn test_filter_text_matches_name_or_description_case_insensitively() {
        let catalog = Catalog::demo().unwrap();
        assert_eq!(ids(&catalog.filter("  DENIM ", None)), vec!["p4"]);
        assert_eq!(ids(&catalog.filter("wireless", None)), vec!["p2"]);
        assert_eq!(ids(&catalog.filter("handmade", None)), vec!["p3", "p6"]);
    }

    #[test]
    fn test_filter_predicates_are_conjunctive() {
        let catalog = Catalog::demo().unwrap();
        assert!(catalog.filter("denim", Some(Category::Handmade)).is_empty());
        assert_eq!(ids(&catalog.filter("vase", Some(Category::Handmade))), vec!["p6"]);
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let catalog = Catalog::demo().unwrap();
        assert_eq!(catalog.filter("", None).len(), 6);
    }

    #[test]
    fn test_find_by_id() {
        let catalog = Catalog::demo().unwrap();
        assert_eq!(catalog.find_by_id("p3").unwrap().name, "Wooden Bowl");
        assert!(catalog.find_by_id("p99").is_none());
    }

    #[test]
    fn test_preview_is_first_four() {
        let catalog = Catalog::demo().unwrap();
        let preview: Vec<&str> = catalog.preview().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(preview, vec!["p1", "p2", "p3", "p4"]);
    }

    #[test]
    fn test_preview_of_small_catalog() {
        let catalog = Catalog::new(Vec::new());
        assert!(catalog.preview().is_empty());
    }

    #[test]
    fn test_related_excludes_current() {
        let catalog = Catalog::demo().unwrap();
        assert_eq!(ids(&catalog.related(&ProductId::new("p1"))), vec!["p2", "p3", "p4"]);
        assert_eq!(ids(&catalog.related(&ProductId::new("p3"))), vec!["p1", "p2", "p4"]);
    }
}
