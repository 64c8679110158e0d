//! Unified error handling for storefront front ends.
//!
//! Provides a unified `AppError` type over every storefront failure, plus
//! the short message a front end shows for it. The message is meant for a
//! transient notification; the full error goes to the log.

use sports_jersey_core::StorageError;
use thiserror::Error;

use crate::api::ApiError;
use crate::checkout::{CheckoutError, EMPTY_CART_MESSAGE};
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Backend API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Order placement failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Durable storage could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad input from the shopper.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Text to show the shopper for this error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(_) | Self::Storage(_) => "Something went wrong, please try again".to_string(),
            Self::Api(err) | Self::Checkout(CheckoutError::Api(err)) => err.detail(),
            Self::Checkout(CheckoutError::EmptyCart) => EMPTY_CART_MESSAGE.to_string(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::BadRequest(msg) => msg.clone(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
