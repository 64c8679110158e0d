//! Cart state management.
//!
//! - [`line_item`] - Line items and add-to-cart candidates
//! - [`cart`] - The in-memory collection and its key discipline
//! - [`totals`] - Shipping, tax and grand total
//! - [`storage`] - Durable storage seam
//! - [`store`] - The cart store tying the above together

#[allow(clippy::module_inception)]
pub mod cart;
pub mod line_item;
pub mod storage;
pub mod store;
pub mod totals;

pub use cart::{Cart, KeyMode, QuantityChange};
pub use line_item::{CartCandidate, LineItem, NO_SIZE, PLACEHOLDER_IMAGE, PLACEHOLDER_NAME};
pub use storage::{CartStorage, MemoryStorage, StorageError};
pub use store::{CART_STORAGE_KEY, CartStore};
pub use totals::{
    FREE_SHIPPING_THRESHOLD, OrderTotals, SHIPPING_FEE, TAX_RATE, compute_order_totals,
};
