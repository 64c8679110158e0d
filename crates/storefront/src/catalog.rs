//! Product catalog with an offline fallback.

use rust_decimal::Decimal;
use sports_jersey_core::{Price, ProductId};
use tracing::{info, warn};

use crate::api::{Product, StoreApiClient};

/// Where a catalog's products came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Api,
    Fallback,
}

/// The products a session can add to its cart.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub source: CatalogSource,
}

impl Catalog {
    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.source == CatalogSource::Fallback
    }
}

/// Load the catalog from the backend, falling back to a built-in list.
///
/// Never fails: any request or decode error is logged and the fallback list
/// is returned instead.
pub async fn load_catalog(client: &StoreApiClient) -> Catalog {
    match client.list_products().await {
        Ok(products) => {
            info!(count = products.len(), "Catalog loaded from backend");
            Catalog {
                products,
                source: CatalogSource::Api,
            }
        }
        Err(e) => {
            warn!(error = %e, "Failed to load products, using fallback catalog");
            Catalog {
                products: fallback_products(),
                source: CatalogSource::Fallback,
            }
        }
    }
}

/// Products shown when the backend is unreachable.
#[must_use]
pub fn fallback_products() -> Vec<Product> {
    vec![
        product(
            "prod1",
            "ProFlex Running Jersey",
            "Sporting Jerseys",
            4999,
            "/static/image/j1.jpeg",
        ),
        product(
            "prod2",
            "Distressed Slim Fit Jeans",
            "Fashionable Jeans",
            7999,
            "/static/image/White_Jeans.jpeg",
        ),
        product(
            "prod3",
            "Urban Vibe Oversized T-Shirt",
            "Trendy T-shirts",
            2999,
            "/static/image/polo1.jpeg",
        ),
    ]
}

fn product(id: &str, name: &str, category: &str, kobo: i64, image: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        price: Price::new(Decimal::new(kobo, 2)),
        image: image.to_string(),
    }
}
