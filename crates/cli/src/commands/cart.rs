//! `sj-cli cart ...`
//!
//! Every subcommand opens the durable cart, applies one change and prints
//! the refreshed view.

use sports_jersey_core::QuantityChange;
use sports_jersey_storefront::catalog::load_catalog;
use sports_jersey_storefront::view::CartView;
use sports_jersey_storefront::{AppError, AppState, Result};

/// Print the cart.
pub fn show(state: &AppState) -> Result<()> {
    let store = state.open_cart()?;
    print_view(&CartView::from(store.cart()));
    Ok(())
}

/// Look a product up in the catalog and add one unit of it.
pub async fn add(state: &AppState, id: &str, size: Option<&str>) -> Result<()> {
    let catalog = load_catalog(state.api()).await;
    let product = catalog
        .find(id)
        .ok_or_else(|| AppError::NotFound(format!("Product {id}")))?;

    let mut store = state.open_cart()?;
    let item = store.add(product.to_candidate(), size);
    println!("Added {} (size {}) - now {} in cart", item.name, item.size, item.quantity);
    print_view(&CartView::from(store.cart()));
    Ok(())
}

/// Remove a row.
pub fn remove(state: &AppState, id: &str, size: Option<&str>) -> Result<()> {
    let mut store = state.open_cart()?;
    if !store.remove(id, size) {
        println!("{id} was not in the cart");
    }
    print_view(&CartView::from(store.cart()));
    Ok(())
}

/// Change a row's quantity by `delta`.
pub fn change_quantity(state: &AppState, id: &str, size: Option<&str>, delta: i64) -> Result<()> {
    let mut store = state.open_cart()?;
    match store.change_quantity(id, size, delta) {
        QuantityChange::Missing => {
            return Err(AppError::NotFound(format!("Cart item {id}")));
        }
        QuantityChange::Updated(quantity) => println!("{id} quantity is now {quantity}"),
        QuantityChange::Removed => println!("{id} removed from cart"),
    }
    print_view(&CartView::from(store.cart()));
    Ok(())
}

/// Empty the cart.
pub fn clear(state: &AppState) -> Result<()> {
    let mut store = state.open_cart()?;
    store.clear();
    println!("Cart cleared");
    Ok(())
}

pub fn print_view(view: &CartView) {
    if view.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for item in &view.items {
        println!(
            "{:<8} {:<36} {:<5} x{:<3} {:>12} {:>12}",
            item.id, item.name, item.size, item.quantity, item.price, item.line_total
        );
    }
    println!();
    println!("Items:    {}", view.item_count);
    println!("Subtotal: {}", view.subtotal);
    println!("Shipping: {}", view.shipping);
    println!("Tax:      {}", view.tax);
    println!("Total:    {}", view.total);
}
