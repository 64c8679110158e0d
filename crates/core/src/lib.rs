//! Sports Jersey Core - Cart domain library.
//!
//! This crate provides the cart logic shared by all Sports Jersey components:
//! - `storefront` - Backend API client, checkout flow and durable storage
//! - `cli` - Command-line front end for browsing, cart and checkout
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure logic - no file I/O,
//! no HTTP clients. Durable storage is reached through the [`CartStorage`]
//! trait, so a [`CartStore`] can be built over an in-memory fake in tests and
//! over a file-backed store in the application.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices and statuses
//! - [`cart`] - Line items, the cart, totals, storage seam and cart store

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::*;
pub use types::*;
