//! Type-safe price representation using decimal arithmetic.
//!
//! Prices reach the cart from untrusted places: `data-price` style strings
//! scraped from a product card (`"₦1,250.00"`), JSON numbers from the
//! backend, and whatever is sitting in durable storage from an earlier
//! session. All of them go through [`Price::coerce`] or
//! [`Price::from_json`], which never fail: anything that does not read as a
//! non-negative number becomes zero, and anything above [`MAX_PRICE`] is
//! capped.

use core::fmt;
use core::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Currency symbol used for every displayed amount (Nigerian Naira).
pub const CURRENCY_SYMBOL: &str = "₦";

/// Largest unit price a cart row can carry (₦1,000,000,000).
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// A unit price in Naira between zero and [`MAX_PRICE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero, the fallback for anything unparseable.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount. Negative amounts become zero
    /// and amounts above [`MAX_PRICE`] are capped.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(amount.clamp(Decimal::ZERO, MAX_PRICE))
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Parse a price leniently from free-form text.
    ///
    /// Leading text such as a currency symbol is skipped up to the first
    /// digit, sign or `.`. From there the longest number is read: an optional
    /// sign, digits with `,` grouping, one `.` and an optional exponent
    /// (`"1e3"` reads as `1000`, `"1.2.3"` as `1.2`). Negative numbers,
    /// empty input and unparseable input yield [`Price::ZERO`].
    #[must_use]
    pub fn coerce(input: &str) -> Self {
        let Some(start) = input.find(|c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        else {
            return Self::ZERO;
        };
        let number = numeric_prefix(input.get(start..).unwrap_or_default());
        if number.is_empty() || number.starts_with('-') {
            return Self::ZERO;
        }

        let unsigned = number.trim_start_matches('+');
        let (mantissa, exponent) = unsigned
            .split_once('e')
            .map_or((unsigned, None), |(m, e)| (m, Some(e)));
        let mantissa = mantissa.trim_end_matches('.');
        let mantissa = if mantissa.starts_with('.') {
            format!("0{mantissa}")
        } else {
            mantissa.to_owned()
        };

        let parsed = match exponent {
            Some(exp) => Decimal::from_scientific(&format!("{mantissa}e{exp}")),
            None => Decimal::from_str(&mantissa),
        };
        parsed.map_or(Self::ZERO, Self::new)
    }

    /// Read a price from an untrusted JSON value.
    ///
    /// Numbers are taken as-is, strings go through [`Price::coerce`], and
    /// everything else (null, booleans, objects) is zero.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => {
                let text = n.to_string();
                Decimal::from_str(&text)
                    .or_else(|_| Decimal::from_scientific(&text))
                    .map_or(Self::ZERO, Self::new)
            }
            serde_json::Value::String(s) => Self::coerce(s),
            _ => Self::ZERO,
        }
    }

    /// Format for display, e.g. `₦1,250.00`.
    #[must_use]
    pub fn display(&self) -> String {
        format_naira(self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

// Stored and sent as a plain JSON number so the persisted layout stays
// `{"price": 49.99}`.
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0.to_f64().unwrap_or(0.0))
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

/// The longest `[sign] digits [. digits] [e [sign] digits]` run at the start
/// of `text`, with `,` grouping removed. Empty when no digit is found.
fn numeric_prefix(text: &str) -> String {
    let mut out = String::new();
    let mut chars = text.chars().peekable();

    if let Some(&sign) = chars.peek()
        && matches!(sign, '-' | '+')
    {
        out.push(sign);
        chars.next();
    }

    let mut seen_dot = false;
    let mut seen_digit = false;
    while let Some(&c) = chars.peek() {
        match c {
            '0'..='9' => {
                out.push(c);
                seen_digit = true;
            }
            ',' if seen_digit && !seen_dot => {}
            '.' if !seen_dot => {
                out.push(c);
                seen_dot = true;
            }
            _ => break,
        }
        chars.next();
    }
    if !seen_digit {
        return String::new();
    }

    if let Some(&e) = chars.peek()
        && matches!(e, 'e' | 'E')
    {
        chars.next();
        let mut exponent = String::from("e");
        if let Some(&sign) = chars.peek()
            && matches!(sign, '-' | '+')
        {
            exponent.push(sign);
            chars.next();
        }
        let mut exponent_digits = false;
        while let Some(&d) = chars.peek()
            && d.is_ascii_digit()
        {
            exponent.push(d);
            exponent_digits = true;
            chars.next();
        }
        if exponent_digits {
            out.push_str(&exponent);
        }
    }
    out
}

/// Format an amount as Naira with thousands grouping and two decimals.
///
/// Rounds half away from zero, matching how browsers format currency.
#[must_use]
pub fn format_naira(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{CURRENCY_SYMBOL}{grouped}.{frac_part}")
}
