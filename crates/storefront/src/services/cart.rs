//! Cart store.
//!
//! The cart is an insertion-ordered list of [`LineItem`]s under the `cart`
//! key. Every mutation loads the list, changes it and writes it back, so the
//! stored value is always the full cart.

use rust_decimal::Decimal;

use pocket_shop_core::{Price, ProductId};

use crate::catalog::Catalog;
use crate::models::{LineItem, PendingAction, Session, cart_total, coerce_quantity};
use crate::storage::{KeyValueStore, StorageError, decode_json, keys, load_or_default, save_json};

/// Result of [`CartStore::add_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The line was appended.
    Added(LineItem),
    /// Nobody is signed in. The intent was saved and the shopper should be
    /// sent to the login page; the cart is untouched.
    LoginRequired(PendingAction),
}

/// Cart store over one storage scope.
pub struct CartStore<'a, S: KeyValueStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> CartStore<'a, S> {
    /// Create a cart store over `store`.
    pub const fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Current line items; malformed data reads as an empty cart.
    #[must_use]
    pub fn lines(&self) -> Vec<LineItem> {
        load_or_default(&*self.store, keys::CART)
    }

    /// Replace the stored cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Encode` if the lines cannot be encoded.
    pub fn save(&mut self, lines: &[LineItem]) -> Result<(), StorageError> {
        save_json(&mut *self.store, keys::CART, lines)
    }

    /// Append one unit of a product, or defer the action until login.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Encode` if the cart or pending action cannot be encoded.
    pub fn add_item(
        &mut self,
        session: &Session,
        product_id: ProductId,
        name: &str,
        price: Price,
    ) -> Result<AddOutcome, StorageError> {
        if !session.is_authenticated() {
            let pending = PendingAction::AddToCart { id: product_id };
            save_json(&mut *self.store, keys::POST_ACTION, &pending)?;
            tracing::info!(?pending, "Add to cart deferred until login");
            return Ok(AddOutcome::LoginRequired(pending));
        }

        let item = LineItem::new(product_id, name.to_owned(), price);
        let mut lines = self.lines();
        lines.push(item.clone());
        self.save(&lines)?;

        tracing::debug!(product_id = %item.product_id, lines = lines.len(), "Added to cart");
        Ok(AddOutcome::Added(item))
    }

    /// Remove the line at `index`. Out-of-range indexes change nothing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Encode` if the cart cannot be encoded.
    pub fn remove_item(&mut self, index: usize) -> Result<Option<LineItem>, StorageError> {
        let mut lines = self.lines();
        if index >= lines.len() {
            return Ok(None);
        }

        let removed = lines.remove(index);
        self.save(&lines)?;
        Ok(Some(removed))
    }

    /// Set the quantity of the line at `index` from raw user input.
    ///
    /// The input is coerced with [`coerce_quantity`]. Returns the stored
    /// quantity, or `None` if there is no line at `index`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Encode` if the cart cannot be encoded.
    pub fn update_quantity(&mut self, index: usize, value: &str) -> Result<Option<u32>, StorageError> {
        let mut lines = self.lines();
        let Some(line) = lines.get_mut(index) else {
            return Ok(None);
        };

        let quantity = coerce_quantity(value);
        line.quantity = quantity;
        self.save(&lines)?;
        Ok(Some(quantity))
    }

    /// Empty the cart (checkout completion).
    pub fn clear(&mut self) {
        self.store.remove(keys::CART);
    }

    /// Sum of `price × quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        cart_total(&self.lines())
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines()
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// The saved pending action, without consuming it.
    #[must_use]
    pub fn pending_action(&self) -> Option<PendingAction> {
        decode_json(&*self.store, keys::POST_ACTION).ok().flatten()
    }

    /// Apply the pending action saved before a login redirect.
    ///
    /// Does nothing while signed out. Otherwise the slot is emptied whether or
    /// not the action can still be applied, so an action runs at most once.
    /// A pending product that is no longer in the catalog is dropped.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Encode` if the cart cannot be encoded.
    pub fn resume_pending(
        &mut self,
        session: &Session,
        catalog: &Catalog,
    ) -> Result<Option<LineItem>, StorageError> {
        if !session.is_authenticated() {
            return Ok(None);
        }

        let pending: Option<PendingAction> = match decode_json(&*self.store, keys::POST_ACTION) {
            Ok(pending) => pending,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding malformed pending action");
                None
            }
        };
        self.store.remove(keys::POST_ACTION);

        let Some(PendingAction::AddToCart { id }) = pending else {
            return Ok(None);
        };

        let Some(product) = catalog.find_by_id(id.as_str()) else {
            tracing::warn!(product_id = %id, "Pending product no longer in catalog");
            return Ok(None);
        };

        match self.add_item(session, product.id.clone(), &product.name, product.price)? {
            AddOutcome::Added(item) => {
                tracing::info!(product_id = %item.product_id, "Resumed pending add to cart");
                Ok(Some(item))
            }
            AddOutcome::LoginRequired(_) => Ok(None),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::CredentialStore;
    use crate::storage::MemoryStore;

    fn signed_in_store() -> (MemoryStore, Session) {
        let mut store = MemoryStore::new();
        let mut session = Session::load(&store);
        CredentialStore::new(&mut store)
            .sign_up(&mut session, "shopper@example.com", "pw")
            .unwrap();
        (store, session)
    }

    fn add(cart: &mut CartStore<'_, MemoryStore>, session: &Session, id: &str, dollars: u32) {
        let outcome = cart
            .add_item(session, ProductId::new(id), id, Price::from_dollars(dollars).unwrap())
            .unwrap();
        assert!(matches!(outcome, AddOutcome::Added(_)));
    }

    #[test]
    fn test_add_item_appends_without_merging() {
        let (mut store, session) = signed_in_store();
        let mut cart = CartStore::new(&mut store);

        add(&mut cart, &session, "p1", 15);
        add(&mut cart, &session, "p1", 15);

        let lines = cart.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.quantity == 1 && l.product_id == *"p1"));
    }

    #[test]
    fn test_add_item_signed_out_defers() {
        let mut store = MemoryStore::new();
        let session = Session::load(&store);
        let mut cart = CartStore::new(&mut store);

        let outcome = cart
            .add_item(&session, ProductId::new("p2"), "Headphones", Price::from_dollars(40).unwrap())
            .unwrap();

        let expected = PendingAction::AddToCart {
            id: ProductId::new("p2"),
        };
        assert_eq!(outcome, AddOutcome::LoginRequired(expected.clone()));
        assert!(cart.lines().is_empty());
        assert_eq!(cart.pending_action(), Some(expected));
        assert!(store.get(keys::CART).is_none());
    }

    #[test]
    fn test_total() {
        let (mut store, session) = signed_in_store();
        let mut cart = CartStore::new(&mut store);
        add(&mut cart, &session, "p1", 15);
        add(&mut cart, &session, "p2", 40);
        cart.update_quantity(0, "2").unwrap();

        assert_eq!(cart.total(), Decimal::from(70));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_total_of_empty_cart() {
        let mut store = MemoryStore::new();
        let cart = CartStore::new(&mut store);
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_update_quantity_coerces_bad_input() {
        let (mut store, session) = signed_in_store();
        let mut cart = CartStore::new(&mut store);
        add(&mut cart, &session, "p1", 15);

        for input in ["0", "-5", "abc"] {
            cart.update_quantity(0, "7").unwrap();
            assert_eq!(cart.update_quantity(0, input).unwrap(), Some(1));
            assert_eq!(cart.lines()[0].quantity, 1, "input {input:?}");
        }
    }

    #[test]
    fn test_update_quantity_missing_index_is_noop() {
        let (mut store, session) = signed_in_store();
        let mut cart = CartStore::new(&mut store);
        add(&mut cart, &session, "p1", 15);
        let before = cart.lines();

        assert_eq!(cart.update_quantity(5, "3").unwrap(), None);
        assert_eq!(cart.lines(), before);
    }

    #[test]
    fn test_remove_item() {
        let (mut store, session) = signed_in_store();
        let mut cart = CartStore::new(&mut store);
        add(&mut cart, &session, "p1", 15);
        add(&mut cart, &session, "p2", 40);
        add(&mut cart, &session, "p3", 25);

        let removed = cart.remove_item(1).unwrap().unwrap();
        assert_eq!(removed.product_id, ProductId::new("p2"));

        let ids: Vec<String> = cart.lines().iter().map(|l| l.product_id.to_string()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);

        assert!(cart.remove_item(9).unwrap().is_none());
        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn test_clear() {
        let (mut store, session) = signed_in_store();
        let mut cart = CartStore::new(&mut store);
        add(&mut cart, &session, "p1", 15);

        cart.clear();
        assert!(cart.lines().is_empty());
        assert!(store.get(keys::CART).is_none());
    }

    #[test]
    fn test_save_of_loaded_cart_is_idempotent() {
        let (mut store, _) = signed_in_store();
        let raw = r#"[{"id":"p1","name":"Cotton T-Shirt","price":15,"qty":2},{"id":"p2","name":"Bluetooth Headphones","price":40,"qty":1}]"#;
        store.set(keys::CART, raw.to_string());

        let mut cart = CartStore::new(&mut store);
        let lines = cart.lines();
        cart.save(&lines).unwrap();
        assert_eq!(cart.lines(), lines);
        assert_eq!(store.get(keys::CART).as_deref(), Some(raw));
    }

    #[test]
    fn test_malformed_cart_reads_as_empty() {
        let mut store = MemoryStore::new();
        store.set(keys::CART, "not json".to_string());
        let cart = CartStore::new(&mut store);
        assert!(cart.lines().is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_oversized_cart_total_saturates() {
        let mut store = MemoryStore::new();
        store.set(
            keys::CART,
            r#"[{"id":"p1","name":"Tee","price":1e20,"qty":4000000000}]"#.to_string(),
        );
        let cart = CartStore::new(&mut store);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total(), Decimal::MAX);
        assert_eq!(cart.item_count(), 4_000_000_000);
    }

    #[test]
    fn test_resume_pending_runs_once() {
        let catalog = Catalog::demo().unwrap();
        let mut store = MemoryStore::new();
        let mut session = Session::load(&store);

        let outcome = CartStore::new(&mut store)
            .add_item(&session, ProductId::new("p5"), "Smart Watch", Price::from_dollars(90).unwrap())
            .unwrap();
        assert!(matches!(outcome, AddOutcome::LoginRequired(_)));

        CredentialStore::new(&mut store)
            .sign_up(&mut session, "late@example.com", "pw")
            .unwrap();

        let mut cart = CartStore::new(&mut store);
        let resumed = cart.resume_pending(&session, &catalog).unwrap().unwrap();
        assert_eq!(resumed.product_id, ProductId::new("p5"));
        assert_eq!(resumed.name, "Smart Watch");
        assert!(cart.pending_action().is_none());

        assert!(cart.resume_pending(&session, &catalog).unwrap().is_none());
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_resume_pending_waits_for_login() {
        let catalog = Catalog::demo().unwrap();
        let mut store = MemoryStore::new();
        let session = Session::load(&store);
        let mut cart = CartStore::new(&mut store);
        cart.add_item(&session, ProductId::new("p1"), "Tee", Price::from_dollars(15).unwrap())
            .unwrap();

        assert!(cart.resume_pending(&session, &catalog).unwrap().is_none());
        assert!(cart.pending_action().is_some());
    }

    #[test]
    fn test_resume_pending_drops_unknown_product() {
        let catalog = Catalog::demo().unwrap();
        let (mut store, session) = signed_in_store();
        store.set(keys::POST_ACTION, r#"{"action":"addToCart","id":"gone"}"#.to_string());

        let mut cart = CartStore::new(&mut store);
        assert!(cart.resume_pending(&session, &catalog).unwrap().is_none());
        assert!(cart.lines().is_empty());
        assert!(store.get(keys::POST_ACTION).is_none());
    }
}
