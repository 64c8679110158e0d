//! Line items and add-to-cart candidates.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Name used when a product arrives without one.
pub const PLACEHOLDER_NAME: &str = "Unnamed Product";

/// Image reference used when a product arrives without one.
pub const PLACEHOLDER_IMAGE: &str = "image/placeholder.jpg";

/// Size value for products without a size dimension.
pub const NO_SIZE: &str = "N/A";

/// One (product, size) row in the cart.
///
/// Deserialization is lenient because stored carts are untrusted: missing or
/// mistyped fields fall back to the same defaults used when adding, and a
/// quantity that cannot be read becomes 0 (the cart drops such rows on load).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawLineItem")]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub size: String,
    pub quantity: u32,
}

impl LineItem {
    /// Build a fresh line item (quantity 1) from a normalized candidate.
    #[must_use]
    pub fn from_candidate(candidate: CartCandidate, size: impl Into<String>) -> Self {
        Self {
            id: ProductId::new(
                non_empty(candidate.id).unwrap_or_else(|| ProductId::MISSING.to_owned()),
            ),
            name: non_empty(candidate.name).unwrap_or_else(|| PLACEHOLDER_NAME.to_owned()),
            price: candidate.price.unwrap_or(Price::ZERO),
            image: non_empty(candidate.image).unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned()),
            size: size.into(),
            quantity: 1,
        }
    }

    /// Unit price times quantity, saturating at [`rust_decimal::Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> rust_decimal::Decimal {
        self.price
            .amount()
            .saturating_mul(rust_decimal::Decimal::from(self.quantity))
    }
}

/// Partial product fields offered to [`crate::CartStore::add`].
///
/// Every field is optional; missing values are filled in when the candidate
/// becomes a [`LineItem`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartCandidate {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Option<Price>,
    pub image: Option<String>,
}

impl CartCandidate {
    /// Start a candidate for the given product id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the price from untrusted text, see [`Price::coerce`].
    #[must_use]
    pub fn price_text(mut self, text: &str) -> Self {
        self.price = Some(Price::coerce(text));
        self
    }

    #[must_use]
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Wire shape of a stored line item before coercion.
#[derive(Deserialize)]
struct RawLineItem {
    #[serde(default)]
    id: serde_json::Value,
    #[serde(default)]
    name: serde_json::Value,
    #[serde(default)]
    price: serde_json::Value,
    #[serde(default)]
    image: serde_json::Value,
    #[serde(default)]
    size: serde_json::Value,
    #[serde(default)]
    quantity: serde_json::Value,
}

impl From<RawLineItem> for LineItem {
    fn from(raw: RawLineItem) -> Self {
        let id = match raw.id {
            serde_json::Value::String(s) if !s.is_empty() => s,
            serde_json::Value::Number(n) => n.to_string(),
            _ => ProductId::MISSING.to_owned(),
        };

        Self {
            id: ProductId::new(id),
            name: text_or(raw.name, PLACEHOLDER_NAME),
            price: Price::from_json(&raw.price),
            image: text_or(raw.image, PLACEHOLDER_IMAGE),
            size: text_or(raw.size, NO_SIZE),
            quantity: coerce_quantity(&raw.quantity),
        }
    }
}

fn text_or(value: serde_json::Value, default: &str) -> String {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => s,
        _ => default.to_owned(),
    }
}

/// Read a stored quantity; anything that is not a positive integer is 0.
///
/// Fractional numbers and numeric strings are truncated toward zero.
fn coerce_quantity(value: &serde_json::Value) -> u32 {
    let whole = match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(truncate)),
        serde_json::Value::String(s) => leading_integer(s.trim()),
        _ => None,
    };
    whole
        .filter(|q| *q > 0)
        .and_then(|q| u32::try_from(q).ok())
        .unwrap_or(0)
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(f: f64) -> i64 {
    // `as` saturates for out-of-range floats
    f.trunc() as i64
}

fn leading_integer(s: &str) -> Option<i64> {
    let digits_end = s
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+'))))
        .map_or(s.len(), |(i, _)| i);
    s.get(..digits_end)?.parse().ok()
}
