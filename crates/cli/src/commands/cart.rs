//! Cart commands. Positions are 1-based.

use std::fmt::Write;

use pocket_shop_core::format_amount;
use pocket_shop_storefront::catalog::Catalog;
use pocket_shop_storefront::models::Session;
use pocket_shop_storefront::services::{AddOutcome, CartStore};
use pocket_shop_storefront::storage::KeyValueStore;

use super::{CliError, cart_index};

/// Cart lines with subtotals and the total.
pub fn list<S: KeyValueStore + ?Sized>(store: &mut S) -> String {
    let cart = CartStore::new(&mut *store);
    let lines = cart.lines();
    if lines.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut out = String::new();
    for (position, line) in lines.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {:<22} {:>6} x {:<3} {:>9}",
            position + 1,
            line.name,
            line.price.to_string(),
            line.quantity,
            format_amount(line.subtotal())
        );
    }
    let _ = write!(out, "Total: {}", format_amount(cart.total()));
    out
}

/// Add one unit of a product, or save it for after login.
///
/// # Errors
///
/// Returns `CliError::UnknownProduct` if no product has `id`.
pub fn add<S: KeyValueStore + ?Sized>(store: &mut S, catalog: &Catalog, id: &str) -> Result<String, CliError> {
    let product = catalog
        .find_by_id(id)
        .ok_or_else(|| CliError::UnknownProduct(id.to_owned()))?;

    let session = Session::load(&*store);
    let outcome = CartStore::new(&mut *store).add_item(&session, product.id.clone(), &product.name, product.price)?;

    Ok(match outcome {
        AddOutcome::Added(line) => format!("{} added to cart.", line.name),
        AddOutcome::LoginRequired(_) => format!(
            "Please log in first. {} will be added to your cart after you log in or sign up.",
            product.name
        ),
    })
}

/// Remove the line at `position`.
///
/// # Errors
///
/// Returns `CliError::InvalidPosition` if there is no such line.
pub fn remove<S: KeyValueStore + ?Sized>(store: &mut S, position: usize) -> Result<String, CliError> {
    let removed = CartStore::new(&mut *store)
        .remove_item(cart_index(position)?)?
        .ok_or(CliError::InvalidPosition(position))?;
    Ok(format!("Removed {}.", removed.name))
}

/// Set the quantity of the line at `position` from raw input.
///
/// # Errors
///
/// Returns `CliError::InvalidPosition` if there is no such line.
pub fn set_quantity<S: KeyValueStore + ?Sized>(
    store: &mut S,
    position: usize,
    quantity: &str,
) -> Result<String, CliError> {
    let stored = CartStore::new(&mut *store)
        .update_quantity(cart_index(position)?, quantity)?
        .ok_or(CliError::InvalidPosition(position))?;
    Ok(format!("Quantity set to {stored}."))
}

pub fn clear<S: KeyValueStore + ?Sized>(store: &mut S) -> String {
    CartStore::new(&mut *store).clear();
    "Cart cleared.".to_string()
}

/// Place the demo order: print the total and empty the cart.
///
/// # Errors
///
/// Returns `CliError::LoginRequired` if nobody is signed in.
pub fn checkout<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<String, CliError> {
    if !Session::load(&*store).is_authenticated() {
        return Err(CliError::LoginRequired);
    }

    let mut cart = CartStore::new(&mut *store);
    let total = cart.total();
    cart.clear();
    tracing::info!(total = %total, "Demo order placed");
    Ok(format!("Order placed (demo). Total: {}", format_amount(total)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pocket_shop_storefront::storage::{FileStore, MemoryStore};

    use super::*;
    use crate::commands::account;

    fn signed_in() -> (MemoryStore, Catalog) {
        let catalog = Catalog::demo().unwrap();
        let mut store = MemoryStore::new();
        account::signup(&mut store, &catalog, "shopper@example.com", "pw").unwrap();
        (store, catalog)
    }

    #[test]
    fn test_add_and_list() {
        let (mut store, catalog) = signed_in();
        assert_eq!(add(&mut store, &catalog, "p1").unwrap(), "Cotton T-Shirt added to cart.");
        add(&mut store, &catalog, "p2").unwrap();
        set_quantity(&mut store, 1, "2").unwrap();

        let out = list(&mut store);
        assert!(out.contains(" 1. Cotton T-Shirt"));
        assert!(out.contains(" 2. Bluetooth Headphones"));
        assert!(out.ends_with("Total: $70.00"));
    }

    #[test]
    fn test_quantity_is_coerced() {
        let (mut store, catalog) = signed_in();
        add(&mut store, &catalog, "p1").unwrap();
        assert_eq!(set_quantity(&mut store, 1, "-5").unwrap(), "Quantity set to 1.");
        assert_eq!(set_quantity(&mut store, 1, "abc").unwrap(), "Quantity set to 1.");
        assert_eq!(set_quantity(&mut store, 1, "4.9").unwrap(), "Quantity set to 4.");
    }

    #[test]
    fn test_positions_out_of_range() {
        let (mut store, catalog) = signed_in();
        add(&mut store, &catalog, "p1").unwrap();
        assert!(matches!(remove(&mut store, 0), Err(CliError::InvalidPosition(0))));
        assert!(matches!(remove(&mut store, 2), Err(CliError::InvalidPosition(2))));
        assert!(matches!(
            set_quantity(&mut store, 3, "2"),
            Err(CliError::InvalidPosition(3))
        ));
        assert_eq!(remove(&mut store, 1).unwrap(), "Removed Cotton T-Shirt.");
        assert_eq!(list(&mut store), "Your cart is empty.");
    }

    #[test]
    fn test_add_signed_out_is_deferred() {
        let catalog = Catalog::demo().unwrap();
        let mut store = MemoryStore::new();
        let out = add(&mut store, &catalog, "p3").unwrap();
        assert!(out.starts_with("Please log in first."));
        assert_eq!(list(&mut store), "Your cart is empty.");
    }

    #[test]
    fn test_checkout() {
        let (mut store, catalog) = signed_in();
        add(&mut store, &catalog, "p5").unwrap();
        assert_eq!(checkout(&mut store).unwrap(), "Order placed (demo). Total: $90.00");
        assert_eq!(list(&mut store), "Your cart is empty.");

        account::logout(&mut store);
        assert!(matches!(checkout(&mut store), Err(CliError::LoginRequired)));
    }

    #[test]
    fn test_state_survives_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.json");
        let catalog = Catalog::demo().unwrap();

        let mut store = FileStore::open(&path).unwrap();
        account::signup(&mut store, &catalog, "ada@example.com", "pw").unwrap();
        add(&mut store, &catalog, "p6").unwrap();
        store.save().unwrap();

        let mut reopened = FileStore::open(&path).unwrap();
        assert_eq!(account::whoami(&reopened), "ada@example.com");
        assert!(list(&mut reopened).contains("Handmade Vase"));
    }
}
