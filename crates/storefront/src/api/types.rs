//! Wire types for the store backend.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sports_jersey_core::{
    CartCandidate, LineItem, NO_SIZE, OrderId, OrderStatus, PaymentMethod, Price, ProductId,
};

// =============================================================================
// Catalog
// =============================================================================

/// A catalog product as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub price: Price,
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// The add-to-cart candidate for this product.
    #[must_use]
    pub fn to_candidate(&self) -> CartCandidate {
        CartCandidate::new(self.id.as_str())
            .name(self.name.as_str())
            .price(self.price)
            .image(self.image.as_str())
    }
}

// =============================================================================
// Orders
// =============================================================================

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_size")]
    pub size: String,
}

fn default_size() -> String {
    NO_SIZE.to_string()
}

impl OrderItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.amount().saturating_mul(Decimal::from(self.quantity))
    }
}

impl From<&LineItem> for OrderItem {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
            image: item.image.clone(),
            size: if item.size.is_empty() {
                default_size()
            } else {
                item.size.clone()
            },
        }
    }
}

/// Who the order is for and where it goes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    #[serde(rename = "customer_name")]
    pub name: String,
    #[serde(rename = "customer_email")]
    pub email: String,
    #[serde(rename = "customer_phone")]
    pub phone: Option<String>,
    #[serde(rename = "customer_address")]
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub items: Vec<OrderItem>,
    #[serde(flatten)]
    pub customer: CustomerDetails,
    pub payment_method: PaymentMethod,
    /// Grand total including shipping and tax.
    pub total_amount: Price,
}

/// Backend acknowledgement of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    #[serde(default)]
    pub success: bool,
    pub order_id: Option<OrderId>,
    pub redirect_url: Option<String>,
}

/// A stored order as returned by `GET /api/orders/{order_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: OrderId,
    pub items: Vec<OrderItem>,
    pub total_amount: Price,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
    /// Seconds since the Unix epoch.
    pub timestamp: Option<f64>,
}

impl OrderRecord {
    /// When the order was placed, if the backend recorded it.
    #[must_use]
    pub fn placed_at(&self) -> Option<DateTime<Utc>> {
        let ts = self.timestamp.filter(|t| t.is_finite())?;
        #[allow(clippy::cast_possible_truncation)]
        let millis = (ts * 1000.0).round() as i64;
        DateTime::from_timestamp_millis(millis)
    }
}

// =============================================================================
// Contact
// =============================================================================

/// Body of `POST /api/contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Backend reply to a contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactReply {
    #[serde(default)]
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_product_deserialize_and_candidate() {
        let json = r#"{"id": "prod7", "name": "Chelsea FC Home Jersey",
            "category": "Sporting Jerseys", "price": 69.99, "image": "image/Chelsea-Blue.jpeg"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price.amount(), Decimal::from_str("69.99").unwrap());

        let item = LineItem::from_candidate(product.to_candidate(), "M");
        assert_eq!(item.id.as_str(), "prod7");
        assert_eq!(item.name, "Chelsea FC Home Jersey");
        assert_eq!(item.image, "image/Chelsea-Blue.jpeg");
    }

    #[test]
    fn test_order_request_wire_shape() {
        let request = OrderRequest {
            items: vec![OrderItem {
                id: ProductId::new("prod1"),
                name: "ProFlex Running Jersey".to_string(),
                price: Price::coerce("49.99"),
                quantity: 2,
                image: "image/j1.jpeg".to_string(),
                size: "M".to_string(),
            }],
            customer: CustomerDetails {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                city: Some("Lagos".to_string()),
                ..CustomerDetails::default()
            },
            payment_method: PaymentMethod::PayOnDelivery,
            total_amount: Price::coerce("1107.47"),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["customer_name"], "Ada");
        assert_eq!(value["customer_email"], "ada@example.com");
        assert_eq!(value["customer_phone"], serde_json::Value::Null);
        assert_eq!(value["city"], "Lagos");
        assert_eq!(value["payment_method"], "pay_on_delivery");
        assert_eq!(value["total_amount"], 1107.47);
        assert_eq!(value["items"][0]["size"], "M");
        assert_eq!(value["items"][0]["quantity"], 2);
    }

    #[test]
    fn test_order_item_size_defaults() {
        let item: OrderItem = serde_json::from_str(
            r#"{"id": "prod1", "name": "A", "price": 1, "quantity": 1, "image": "x"}"#,
        )
        .unwrap();
        assert_eq!(item.size, "N/A");
    }

    #[test]
    fn test_order_record_placed_at() {
        let json = r#"{"order_id": "JS-1700000000000-123", "items": [],
            "total_amount": 1075.0, "customer_name": "Ada", "customer_email": "a@b.c",
            "customer_phone": null, "customer_address": null,
            "status": "received", "timestamp": 1700000000.5}"#;
        let record: OrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, OrderStatus::Received);
        assert_eq!(
            record.placed_at().unwrap().timestamp_millis(),
            1_700_000_000_500
        );
    }

    #[test]
    fn test_contact_message_omits_missing_phone() {
        let message = ContactMessage {
            name: "Ada".to_string(),
            email: "a@b.c".to_string(),
            message: "Do you ship to Abuja?".to_string(),
            phone: None,
        };
        let value = serde_json::to_value(&message).unwrap();
        assert!(value.get("phone").is_none());
    }
}
