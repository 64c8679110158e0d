//! Client for the store backend's JSON API.
//!
//! # Endpoints
//!
//! - `GET /api/products` and `GET /api/products/{id}`
//! - `POST /api/orders` and `GET /api/orders/{order_id}`
//! - `POST /api/contact`
//!
//! Failures carry the backend's `detail` message when it sends one. Nothing
//! is retried; callers decide whether to resubmit.

pub mod types;

pub use types::*;

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::StorefrontConfig;

/// Message used when a failed response has no readable `detail`.
pub const FALLBACK_ERROR_DETAIL: &str = "Request failed";

/// Message used when a failed order response has no readable `detail`.
pub const ORDER_FAILED_DETAIL: &str = "Failed to place order";

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: unreachable host, timeout, broken connection.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("API error: {status} - {detail}")]
    Api { status: u16, detail: String },

    /// Resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body was not the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// The message a shopper should see for this failure.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Api { detail, .. } => detail.clone(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::Http(_) | Self::Parse(_) => FALLBACK_ERROR_DETAIL.to_string(),
        }
    }
}

/// Error body shape used by the backend.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Typed client for the store backend.
#[derive(Debug, Clone)]
pub struct StoreApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl StoreApiClient {
    /// Create a client from storefront configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        Self::with_base_url(config.api_base_url.clone(), config.http_timeout)
    }

    /// Create a client against an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn with_base_url(mut base_url: Url, timeout: Option<Duration>) -> Result<Self, ApiError> {
        // Url::join replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the full product catalog.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body is not a product list.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.client.get(self.endpoint("api/products")?).send().await?;
        read_json(response, FALLBACK_ERROR_DETAIL).await
    }

    /// Fetch one product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown id, or any other
    /// `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> Result<Product, ApiError> {
        let path = format!("api/products/{}", urlencoding::encode(id));
        let response = self.client.get(self.endpoint(&path)?).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(format!("Product {id}")));
        }
        read_json(response, FALLBACK_ERROR_DETAIL).await
    }

    /// Submit an order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with the backend's `detail` (or
    /// [`ORDER_FAILED_DETAIL`]) when the order is rejected, or any other
    /// `ApiError` if the request fails.
    #[instrument(skip(self, order), fields(items = order.items.len(), total = %order.total_amount))]
    pub async fn place_order(&self, order: &OrderRequest) -> Result<OrderConfirmation, ApiError> {
        let response = self
            .client
            .post(self.endpoint("api/orders")?)
            .json(order)
            .send()
            .await?;
        read_json(response, ORDER_FAILED_DETAIL).await
    }

    /// Fetch a placed order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown order, or any other
    /// `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: &str) -> Result<OrderRecord, ApiError> {
        let path = format!("api/orders/{}", urlencoding::encode(order_id));
        let response = self.client.get(self.endpoint(&path)?).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(format!("Order {order_id}")));
        }
        read_json(response, FALLBACK_ERROR_DETAIL).await
    }

    /// Send a contact form message as `application/x-www-form-urlencoded`
    /// fields. The reply is JSON.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects the message.
    #[instrument(skip(self, message), fields(email = %message.email))]
    pub async fn submit_contact(&self, message: &ContactMessage) -> Result<ContactReply, ApiError> {
        let response = self
            .client
            .post(self.endpoint("api/contact")?)
            .form(message)
            .send()
            .await?;
        read_json(response, FALLBACK_ERROR_DETAIL).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Parse(format!("Invalid endpoint {path}: {e}")))
    }
}

/// Decode a success body, or turn a failure body into `ApiError::Api`.
async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    fallback: &str,
) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let detail = extract_detail(&body).unwrap_or_else(|| fallback.to_string());
        tracing::warn!(status = %status, detail = %detail, "Backend returned non-success status");
        return Err(ApiError::Api {
            status: status.as_u16(),
            detail,
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %body.chars().take(500).collect::<String>(),
            "Failed to parse backend response"
        );
        ApiError::Parse(e.to_string())
    })
}

/// Pull a human-readable `detail` out of an error body.
///
/// Validation errors send `detail` as a list of objects; their `msg` fields
/// are joined.
fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
        serde_json::Value::Array(entries) => {
            let messages: Vec<String> = entries
                .iter()
                .filter_map(|e| e.get("msg").and_then(serde_json::Value::as_str))
                .map(str::to_string)
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
