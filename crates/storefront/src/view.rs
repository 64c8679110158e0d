//! Display data for the cart, rebuilt after every mutation.

use rust_decimal::Decimal;
use serde::Serialize;
use sports_jersey_core::{Cart, LineItem, compute_order_totals, format_naira};

/// Cart row display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub size: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
    pub image: String,
}

/// Cart display data: rows plus the order summary.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u64,
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&Cart::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        // An empty cart has nothing to ship, so every amount reads zero
        if cart.is_empty() {
            let zero = format_naira(Decimal::ZERO);
            return Self {
                items: Vec::new(),
                item_count: 0,
                subtotal: zero.clone(),
                shipping: zero.clone(),
                tax: zero.clone(),
                total: zero,
            };
        }

        let totals = compute_order_totals(cart.subtotal());
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            item_count: cart.item_count(),
            subtotal: format_naira(totals.subtotal),
            shipping: format_shipping(totals.shipping),
            tax: format_naira(totals.tax),
            total: format_naira(totals.total),
        }
    }
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            size: item.size.clone(),
            quantity: item.quantity,
            price: item.price.display(),
            line_total: format_naira(item.line_total()),
            image: item.image.clone(),
        }
    }
}

fn format_shipping(shipping: Decimal) -> String {
    if shipping.is_zero() {
        "Free".to_string()
    } else {
        format_naira(shipping)
    }
}
