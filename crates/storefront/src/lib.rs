//! Sports Jersey storefront library.
//!
//! Wires the cart from `sports-jersey-core` to durable file storage and the
//! store backend: catalog loading, checkout, contact messages, and the
//! display views a front end renders.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod view;

pub use error::{AppError, Result};
pub use state::AppState;
