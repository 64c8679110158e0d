//! Order totals derived from a cart subtotal.
//!
//! Everything here is a pure function of the subtotal, computed with exact
//! decimal arithmetic. No rounding happens until an amount is formatted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Flat shipping fee charged below the free-shipping threshold (₦1,000).
pub const SHIPPING_FEE: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Subtotal at which shipping becomes free (₦10,000).
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Tax rate applied to the subtotal (7.5%).
pub const TAX_RATE: Decimal = Decimal::from_parts(75, 0, 0, false, 3);

/// Subtotal, shipping, tax and grand total for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Compute shipping, tax and total for a subtotal.
///
/// Shipping is [`SHIPPING_FEE`] unless the subtotal is at least
/// [`FREE_SHIPPING_THRESHOLD`]. Tax is [`TAX_RATE`] of the subtotal.
/// Amounts saturate at [`Decimal::MAX`] instead of overflowing.
#[must_use]
pub fn compute_order_totals(subtotal: Decimal) -> OrderTotals {
    let shipping = if subtotal >= FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        SHIPPING_FEE
    };
    let tax = subtotal.saturating_mul(TAX_RATE);

    OrderTotals {
        subtotal,
        shipping,
        tax,
        total: subtotal.saturating_add(shipping).saturating_add(tax),
    }
}
