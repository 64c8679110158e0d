//! `sj-cli checkout`

use sports_jersey_core::PaymentMethod;
use sports_jersey_storefront::api::CustomerDetails;
use sports_jersey_storefront::checkout::submit_order;
use sports_jersey_storefront::view::CartView;
use sports_jersey_storefront::{AppState, Result};

use super::cart::print_view;

/// Place an order for the whole cart. The cart is only emptied once the
/// store confirms the order.
pub async fn place(
    state: &AppState,
    customer: CustomerDetails,
    payment_method: PaymentMethod,
) -> Result<()> {
    let mut store = state.open_cart()?;
    print_view(&CartView::from(store.cart()));

    let confirmation = submit_order(state.api(), &mut store, customer, payment_method).await?;

    match (&confirmation.order_id, &confirmation.redirect_url) {
        (Some(order_id), _) => println!("Order placed! Your order ID is {order_id}"),
        (None, Some(url)) => println!("Order placed! Confirmation: {url}"),
        (None, None) => println!("Order placed!"),
    }
    Ok(())
}
