//! Order placement and contact messages.
//!
//! The stored cart is only deleted once the backend has confirmed the order.
//! Any failure leaves it exactly as it was so the shopper can resubmit.

use sports_jersey_core::{CartStorage, CartStore, PaymentMethod, Price};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::api::{
    ApiError, ContactMessage, CustomerDetails, OrderConfirmation, OrderItem, OrderRequest,
    StoreApiClient,
};

/// Message shown when checking out with nothing in the cart.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty!";

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty!")]
    EmptyCart,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Build the order body for the current cart.
///
/// `total_amount` is the grand total, shipping and tax included.
#[must_use]
pub fn build_order_request<S: CartStorage>(
    store: &CartStore<S>,
    customer: CustomerDetails,
    payment_method: PaymentMethod,
) -> OrderRequest {
    OrderRequest {
        items: store.items().iter().map(OrderItem::from).collect(),
        customer,
        payment_method,
        total_amount: Price::new(store.totals().total),
    }
}

/// Place an order for everything in the cart.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` without contacting the backend when
/// the cart is empty, or `CheckoutError::Api` when the order is rejected.
#[instrument(skip_all, fields(payment = %payment_method))]
pub async fn submit_order<S: CartStorage>(
    client: &StoreApiClient,
    store: &mut CartStore<S>,
    customer: CustomerDetails,
    payment_method: PaymentMethod,
) -> Result<OrderConfirmation, CheckoutError> {
    if store.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let request = build_order_request(store, customer, payment_method);
    match client.place_order(&request).await {
        Ok(confirmation) => {
            info!(
                order_id = ?confirmation.order_id,
                items = request.items.len(),
                "Order placed"
            );
            store.discard();
            Ok(confirmation)
        }
        Err(e) => {
            warn!(error = %e, "Order failed, cart kept");
            Err(e.into())
        }
    }
}

/// Send a contact form message and return the backend's reply text.
///
/// # Errors
///
/// Returns `ApiError` if the message could not be delivered.
pub async fn send_contact(
    client: &StoreApiClient,
    message: &ContactMessage,
) -> Result<String, ApiError> {
    let reply = client.submit_contact(message).await?;
    Ok(reply.message)
}
