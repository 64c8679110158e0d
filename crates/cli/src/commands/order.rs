//! `sj-cli order <order_id>`

use sports_jersey_core::format_naira;
use sports_jersey_storefront::{AppState, Result};

/// Print a placed order.
pub async fn show(state: &AppState, order_id: &str) -> Result<()> {
    let order = state.api().get_order(order_id).await?;

    println!("Order {} ({})", order.order_id, order.status);
    if let Some(placed_at) = order.placed_at() {
        println!("Placed:   {}", placed_at.format("%Y-%m-%d %H:%M"));
    }
    println!("Customer: {} <{}>", order.customer_name, order.customer_email);
    if let Some(phone) = &order.customer_phone {
        println!("Phone:    {phone}");
    }
    if let Some(address) = &order.customer_address {
        println!("Address:  {address}");
    }
    println!();
    for item in &order.items {
        println!(
            "{:<8} {:<36} {:<5} x{:<3} {:>12}",
            item.id.as_str(),
            item.name,
            item.size,
            item.quantity,
            format_naira(item.line_total())
        );
    }
    println!();
    println!("Total:    {}", order.total_amount);
    Ok(())
}
