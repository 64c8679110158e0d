//! The cart store: the authoritative cart plus its durable mirror.
//!
//! Every mutation follows the same discipline: apply to the in-memory cart,
//! write the whole cart back to storage, then let readers recompute whatever
//! they display. Writes are best effort; a failed write is logged and the
//! in-memory cart stays authoritative for the rest of the session.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::cart::{Cart, KeyMode, QuantityChange};
use super::line_item::{CartCandidate, LineItem};
use super::storage::CartStorage;
use super::totals::{OrderTotals, compute_order_totals};

/// Storage key holding the JSON-encoded cart.
pub const CART_STORAGE_KEY: &str = "sports_jersey_cart";

/// Owns the cart for one session and keeps storage in sync with it.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    cart: Cart,
    mode: KeyMode,
}

impl<S: CartStorage> CartStore<S> {
    /// Load the cart from `storage`.
    ///
    /// A missing key or any payload that is not a JSON array of line items
    /// yields an empty cart. This never fails.
    pub fn load(storage: S, mode: KeyMode) -> Self {
        let cart = storage
            .get(CART_STORAGE_KEY)
            .map_or_else(Cart::new, |raw| decode_cart(&raw, mode));

        debug!(
            items = cart.unique_item_count(),
            count = cart.item_count(),
            ?mode,
            "Cart loaded"
        );

        Self {
            storage,
            cart,
            mode,
        }
    }

    /// Add one unit of a product.
    ///
    /// `size` is the size picked for the product, if any. Under
    /// [`KeyMode::SizeAgnostic`] it is ignored.
    pub fn add(&mut self, candidate: CartCandidate, size: Option<&str>) -> LineItem {
        let item = self.cart.add(candidate, size, self.mode);
        debug!(
            id = %item.id,
            size = %item.size,
            quantity = item.quantity,
            "Added to cart"
        );
        self.persist();
        item
    }

    /// Remove every row matching `(id, size)`. Missing rows are a no-op.
    pub fn remove(&mut self, id: &str, size: Option<&str>) -> bool {
        let removed = self.cart.remove(id, size, self.mode);
        if removed {
            debug!(id, ?size, "Removed from cart");
        }
        self.persist();
        removed
    }

    /// Add `delta` to a row's quantity, removing it when the result is not
    /// positive.
    pub fn change_quantity(&mut self, id: &str, size: Option<&str>, delta: i64) -> QuantityChange {
        let change = self.cart.change_quantity(id, size, delta, self.mode);
        match change {
            QuantityChange::Missing => return change,
            QuantityChange::Updated(quantity) => debug!(id, ?size, quantity, "Quantity changed"),
            QuantityChange::Removed => debug!(id, ?size, "Quantity reached zero, row removed"),
        }
        self.persist();
        change
    }

    /// Empty the cart and persist the empty state.
    pub fn clear(&mut self) {
        self.cart.clear();
        debug!("Cart cleared");
        self.persist();
    }

    /// Empty the cart and delete its stored copy.
    ///
    /// Used once an order has been confirmed, so the next session starts
    /// with no stored cart at all.
    pub fn discard(&mut self) {
        self.cart.clear();
        debug!("Cart discarded");
        if let Err(e) = self.storage.remove(CART_STORAGE_KEY) {
            warn!(error = %e, "Failed to remove stored cart, persisting empty cart instead");
            self.persist();
        }
    }

    /// Sum of quantities across all rows.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Sum of price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.cart.subtotal()
    }

    /// Shipping, tax and total for the current subtotal.
    #[must_use]
    pub fn totals(&self) -> OrderTotals {
        compute_order_totals(self.subtotal())
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    #[must_use]
    pub const fn key_mode(&self) -> KeyMode {
        self.mode
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage, e.g. to reload it in a fresh store.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.cart) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to encode cart, keeping previous stored copy");
                return;
            }
        };

        if let Err(e) = self.storage.set(CART_STORAGE_KEY, &payload) {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}

fn decode_cart(raw: &str, mode: KeyMode) -> Cart {
    match serde_json::from_str::<Vec<LineItem>>(raw) {
        Ok(items) => Cart::from_items(items, mode),
        Err(e) => {
            debug!(error = %e, "Stored cart is malformed, starting empty");
            Cart::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::storage::{MemoryStorage, StorageError};
    use crate::types::Price;
    use std::str::FromStr;

    fn store() -> CartStore<MemoryStorage> {
        CartStore::load(MemoryStorage::new(), KeyMode::SizeAware)
    }

    fn jersey(id: &str, price: &str) -> CartCandidate {
        CartCandidate::new(id).name("Jersey").price_text(price)
    }

    fn stored(store: &CartStore<MemoryStorage>) -> serde_json::Value {
        serde_json::from_str(&store.storage().get(CART_STORAGE_KEY).unwrap()).unwrap()
    }

    #[test]
    fn test_n_adds_same_key_gives_count_n_and_one_row() {
        let mut store = store();
        for _ in 0..7 {
            store.add(jersey("prod1", "49.99"), Some("M"));
        }
        assert_eq!(store.item_count(), 7);
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn test_remove_then_add_starts_fresh() {
        let mut store = store();
        store.add(jersey("prod1", "49.99"), Some("M"));
        store.add(jersey("prod1", "49.99"), Some("M"));
        store.add(jersey("prod1", "49.99"), Some("M"));

        assert!(store.remove("prod1", Some("M")));
        let item = store.add(jersey("prod1", "49.99"), Some("M"));
        assert_eq!(item.quantity, 1);
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_negative_full_quantity_equals_remove() {
        let mut store = store();
        store.add(jersey("prod1", "49.99"), Some("M"));
        store.add(jersey("prod1", "49.99"), Some("M"));
        store.add(jersey("prod2", "79.99"), None);

        let change = store.change_quantity("prod1", Some("M"), -2);
        assert_eq!(change, QuantityChange::Removed);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].id.as_str(), "prod2");
        assert_eq!(stored(&store).as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_subtotal_and_totals() {
        let mut store = store();
        assert_eq!(store.subtotal(), Decimal::ZERO);

        store.add(jersey("prod1", "4000"), None);
        store.add(jersey("prod1", "4000"), None);
        store.add(jersey("prod2", "2000"), None);

        assert_eq!(store.subtotal(), Decimal::from(10_000));
        let totals = store.totals();
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::from(750));
        assert_eq!(totals.total, Decimal::from(10_750));
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut store = store();
        store.add(jersey("prod1", "49.99"), Some("S"));
        assert_eq!(stored(&store)[0]["quantity"], 1);

        store.change_quantity("prod1", Some("S"), 2);
        assert_eq!(stored(&store)[0]["quantity"], 3);
        assert_eq!(stored(&store)[0]["size"], "S");
        assert_eq!(stored(&store)[0]["price"], 49.99);
    }

    #[test]
    fn test_round_trip_three_entries() {
        let mut store = store();
        store.add(jersey("prod1", "49.99"), Some("M"));
        store.add(jersey("prod1", "49.99"), Some("L"));
        store.add(jersey("prod4", "39.99"), None);
        store.add(jersey("prod4", "39.99"), None);
        let before = store.items().to_vec();

        let reloaded = CartStore::load(store.into_storage(), KeyMode::SizeAware);
        assert_eq!(reloaded.items(), before.as_slice());
    }

    #[test]
    fn test_malformed_storage_loads_empty() {
        for raw in ["not json", "null", "{\"id\": \"prod1\"}", "[1, 2, 3]", "42"] {
            let storage = MemoryStorage::with_entry(CART_STORAGE_KEY, raw);
            let store = CartStore::load(storage, KeyMode::SizeAware);
            assert!(store.is_empty(), "{raw}");
            assert_eq!(store.item_count(), 0);
        }
    }

    #[test]
    fn test_untrusted_prices_are_recoerced_on_load() {
        let raw = r#"[
            {"id": "prod1", "name": "A", "price": "abc", "quantity": 2},
            {"id": "prod2", "name": "B", "price": "12.50", "quantity": "2"}
        ]"#;
        let store = CartStore::load(
            MemoryStorage::with_entry(CART_STORAGE_KEY, raw),
            KeyMode::SizeAware,
        );
        assert_eq!(store.items()[0].price, Price::ZERO);
        assert_eq!(store.subtotal(), Decimal::from_str("25.00").unwrap());
        assert_eq!(store.item_count(), 4);
    }

    #[test]
    fn test_oversized_stored_prices_do_not_overflow_totals() {
        let raw = r#"[
            {"id": "p", "price": "79228162514264337593543950335", "quantity": 2},
            {"id": "q", "price": 7.9e28, "quantity": 4294967295},
            {"id": "r", "price": 7.9e28, "quantity": 4294967295, "size": "L"}
        ]"#;
        let store = CartStore::load(
            MemoryStorage::with_entry(CART_STORAGE_KEY, raw),
            KeyMode::SizeAware,
        );
        assert_eq!(store.items()[0].price.amount(), crate::types::MAX_PRICE);

        let subtotal = store.subtotal();
        let totals = store.totals();
        assert_eq!(totals.subtotal, subtotal);
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert!(totals.total >= subtotal);

        let single = CartStore::load(
            MemoryStorage::with_entry(
                CART_STORAGE_KEY,
                r#"[{"id": "p", "price": "79228162514264337593543950335", "quantity": 1}]"#,
            ),
            KeyMode::SizeAware,
        );
        assert_eq!(single.subtotal(), crate::types::MAX_PRICE);
        assert!(single.totals().total > crate::types::MAX_PRICE);
    }

    #[test]
    fn test_discard_removes_stored_cart() {
        let mut store = store();
        store.add(jersey("prod1", "49.99"), None);
        store.discard();

        assert!(store.is_empty());
        assert_eq!(store.storage().get(CART_STORAGE_KEY), None);

        let reloaded = CartStore::load(store.into_storage(), KeyMode::SizeAware);
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_clear_empties_memory_and_storage() {
        let mut store = store();
        store.add(jersey("prod1", "49.99"), None);
        store.clear();

        assert_eq!(store.item_count(), 0);
        assert_eq!(store.storage().get(CART_STORAGE_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_size_agnostic_store_keys_by_id() {
        let mut store = CartStore::load(MemoryStorage::new(), KeyMode::SizeAgnostic);
        store.add(jersey("prod1", "49.99"), Some("M"));
        store.add(jersey("prod1", "49.99"), Some("XL"));
        assert_eq!(store.items().len(), 1);

        assert!(store.remove("prod1", Some("whatever")));
        assert!(store.is_empty());
    }

    #[test]
    fn test_missing_quantity_change_does_not_write() {
        let mut store = store();
        assert_eq!(
            store.change_quantity("prod1", None, 1),
            QuantityChange::Missing
        );
        assert_eq!(store.storage().get(CART_STORAGE_KEY), None);
    }

    #[derive(Default)]
    struct FullStorage;

    impl CartStorage for FullStorage {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_writes_do_not_block_mutations() {
        let mut store = CartStore::load(FullStorage, KeyMode::SizeAware);
        store.add(jersey("prod1", "49.99"), None);
        store.add(jersey("prod1", "49.99"), None);
        assert_eq!(store.item_count(), 2);

        store.clear();
        assert!(store.is_empty());
    }
}
