//! Catalog browsing commands.

use std::fmt::Write;

use pocket_shop_core::Category;
use pocket_shop_storefront::catalog::Catalog;
use pocket_shop_storefront::models::Product;

use super::CliError;

fn product_row(product: &Product) -> String {
    format!(
        "{:<4} {:<22} {:>6}  [{}]",
        product.id.as_str(),
        product.name,
        product.price.to_string(),
        product.category.as_str()
    )
}

/// Products matching `search` and `category`, one per line.
pub fn list(catalog: &Catalog, search: &str, category: Option<Category>) -> String {
    let products = catalog.filter(search, category);
    if products.is_empty() {
        return "No products match your search.".to_string();
    }

    products
        .into_iter()
        .map(product_row)
        .collect::<Vec<_>>()
        .join("\n")
}

/// One product with its related products.
///
/// # Errors
///
/// Returns `CliError::UnknownProduct` if no product has `id`.
pub fn show(catalog: &Catalog, id: &str) -> Result<String, CliError> {
    let product = catalog
        .find_by_id(id)
        .ok_or_else(|| CliError::UnknownProduct(id.to_owned()))?;

    let mut out = format!(
        "{} ({})\n{}\nPrice: {}\n\nRelated:",
        product.name, product.id, product.description, product.price
    );
    for related in catalog.related(&product.id) {
        let _ = write!(out, "\n  {}", product_row(related));
    }
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_list_filters_by_category() {
        let catalog = Catalog::demo().unwrap();
        let out = list(&catalog, "", Some(Category::Handmade));
        assert_eq!(out.lines().count(), 2);
        assert!(out.contains("Wooden Bowl"));
        assert!(out.contains("Handmade Vase"));
    }

    #[test]
    fn test_list_without_matches() {
        let catalog = Catalog::demo().unwrap();
        assert_eq!(list(&catalog, "zeppelin", None), "No products match your search.");
    }

    #[test]
    fn test_show_includes_related() {
        let catalog = Catalog::demo().unwrap();
        let out = show(&catalog, "p2").unwrap();
        assert!(out.starts_with("Bluetooth Headphones (p2)"));
        assert!(out.contains("Price: $40"));
        assert!(out.contains("Cotton T-Shirt"));
        assert!(out.contains("Denim Jacket"));
    }

    #[test]
    fn test_show_unknown_product() {
        let catalog = Catalog::demo().unwrap();
        assert!(matches!(show(&catalog, "p99"), Err(CliError::UnknownProduct(_))));
    }
}
