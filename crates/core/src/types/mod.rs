//! Core types for the Sports Jersey store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod status;

pub use id::*;
pub use price::{CURRENCY_SYMBOL, MAX_PRICE, Price, format_naira};
pub use status::*;
