//! Subcommand implementations.
//!
//! Results are written to stdout; logs go to stderr.

#![allow(clippy::print_stdout)]

pub mod cart;
pub mod checkout;
pub mod contact;
pub mod order;
pub mod products;
