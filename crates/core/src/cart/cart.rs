//! The in-memory cart and its key discipline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line_item::{CartCandidate, LineItem, NO_SIZE};

/// Whether `size` takes part in the identity of a cart row.
///
/// A store picks one mode and applies it to every add, remove and quantity
/// change, so the same product in two sizes is never silently merged in one
/// place and kept apart in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMode {
    /// Rows are keyed by `(id, size)`. A missing size means [`NO_SIZE`].
    #[default]
    SizeAware,
    /// Rows are keyed by `id` alone; new rows always get [`NO_SIZE`].
    SizeAgnostic,
}

impl KeyMode {
    /// The size a new row gets for the requested size.
    #[must_use]
    pub fn resolve_size(self, requested: Option<&str>) -> String {
        match self {
            Self::SizeAware => requested
                .filter(|s| !s.is_empty())
                .unwrap_or(NO_SIZE)
                .to_owned(),
            Self::SizeAgnostic => NO_SIZE.to_owned(),
        }
    }

    /// Whether `item` is the row addressed by `(id, size)`.
    #[must_use]
    pub fn matches(self, item: &LineItem, id: &str, size: Option<&str>) -> bool {
        if item.id.as_str() != id {
            return false;
        }
        match self {
            Self::SizeAware => item.size == self.resolve_size(size),
            Self::SizeAgnostic => true,
        }
    }
}

/// Outcome of [`Cart::change_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// No row matched; nothing changed.
    Missing,
    /// The row now has this quantity.
    Updated(u32),
    /// The quantity dropped to zero or below and the row was removed.
    Removed,
}

/// Ordered line items, unique by key, every quantity at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from untrusted rows, restoring the invariants.
    ///
    /// Rows with quantity 0 are dropped. Rows that share a key under `mode`
    /// are merged into the first one, summing quantities.
    #[must_use]
    pub fn from_items(items: Vec<LineItem>, mode: KeyMode) -> Self {
        let mut cart = Self::new();
        for item in items.into_iter().filter(|i| i.quantity > 0) {
            let size = item.size.clone();
            if let Some(existing) = cart.find_mut(item.id.as_str(), Some(size.as_str()), mode) {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            } else {
                cart.items.push(item);
            }
        }
        cart
    }

    /// Add one unit of `candidate`, creating the row if needed.
    ///
    /// Returns a copy of the row as it is after the add.
    pub fn add(&mut self, candidate: CartCandidate, size: Option<&str>, mode: KeyMode) -> LineItem {
        let fresh = LineItem::from_candidate(candidate, mode.resolve_size(size));

        if let Some(existing) = self.find_mut(fresh.id.as_str(), Some(fresh.size.as_str()), mode) {
            existing.quantity = existing.quantity.saturating_add(1);
            return existing.clone();
        }

        self.items.push(fresh.clone());
        fresh
    }

    /// Remove every row matching the key. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str, size: Option<&str>, mode: KeyMode) -> bool {
        let before = self.items.len();
        self.items.retain(|i| !mode.matches(i, id, size));
        self.items.len() < before
    }

    /// Add `delta` to the matching row's quantity.
    ///
    /// A result of zero or less removes the row rather than clamping it.
    pub fn change_quantity(
        &mut self,
        id: &str,
        size: Option<&str>,
        delta: i64,
        mode: KeyMode,
    ) -> QuantityChange {
        let Some(item) = self.find_mut(id, size, mode) else {
            return QuantityChange::Missing;
        };

        let next = i64::from(item.quantity).saturating_add(delta);
        if next <= 0 {
            self.remove(id, size, mode);
            return QuantityChange::Removed;
        }

        item.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        QuantityChange::Updated(item.quantity)
    }

    /// Remove every row.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of price times quantity over all rows, saturating at
    /// [`Decimal::MAX`].
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .map(LineItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// The rows in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct rows.
    #[must_use]
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn find_mut(&mut self, id: &str, size: Option<&str>, mode: KeyMode) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| mode.matches(i, id, size))
    }
}
