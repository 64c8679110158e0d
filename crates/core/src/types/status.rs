//! Status and choice enums shared between the cart and the order backend.

use serde::{Deserialize, Serialize};

/// Order status as reported by the backend.
///
/// Orders are created as `pending` and moved to `received` once the backend
/// has stored them. Any value the client does not know about is kept as
/// [`OrderStatus::Other`] so an order lookup never fails on a new status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Received,
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Received => write!(f, "received"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Payment method chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Card payment collected by the backend's processor.
    Card,
    /// Manual bank transfer.
    BankTransfer,
    /// Cash or POS on delivery.
    PayOnDelivery,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::BankTransfer => write!(f, "bank_transfer"),
            Self::PayOnDelivery => write!(f, "pay_on_delivery"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "bank_transfer" => Ok(Self::BankTransfer),
            "pay_on_delivery" => Ok(Self::PayOnDelivery),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_known_and_unknown() {
        let received: OrderStatus = serde_json::from_str("\"received\"").unwrap();
        assert_eq!(received, OrderStatus::Received);

        let shipped: OrderStatus = serde_json::from_str("\"shipped\"").unwrap();
        assert_eq!(shipped, OrderStatus::Other("shipped".to_string()));
        assert_eq!(shipped.to_string(), "shipped");
    }

    #[test]
    fn test_payment_method_round_trips_through_str() {
        for method in [
            PaymentMethod::Card,
            PaymentMethod::BankTransfer,
            PaymentMethod::PayOnDelivery,
        ] {
            let parsed: PaymentMethod = method.to_string().parse().unwrap();
            assert_eq!(parsed, method);
        }
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_serializes_snake_case() {
        let json = serde_json::to_string(&PaymentMethod::PayOnDelivery).unwrap();
        assert_eq!(json, "\"pay_on_delivery\"");
    }
}
