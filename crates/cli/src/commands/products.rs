//! `sj-cli products`

use sports_jersey_storefront::catalog::load_catalog;
use sports_jersey_storefront::{AppState, Result};

/// Print the catalog, one product per line.
pub async fn list(state: &AppState) -> Result<()> {
    let catalog = load_catalog(state.api()).await;

    if catalog.is_fallback() {
        println!("(store is offline, showing featured products)");
    }
    for product in &catalog.products {
        println!(
            "{:<8} {:<36} {:<20} {:>12}",
            product.id.as_str(),
            product.name,
            product.category,
            product.price.display()
        );
    }
    Ok(())
}
