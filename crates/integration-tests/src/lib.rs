//! Integration tests for the Sports Jersey storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sports-jersey-integration-tests
//! ```
//!
//! Tests run the storefront client against [`MockBackend`], an in-process
//! `axum` server on an ephemeral loopback port that speaks the store's HTTP
//! API. Every endpoint takes JSON except `/api/contact`, which only accepts
//! form fields. No external services are needed.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::{Value, json};
use sports_jersey_core::{OrderId, OrderStatus};
use sports_jersey_storefront::api::{
    ApiError, ContactMessage, OrderRecord, OrderRequest, Product, StoreApiClient,
};
use sports_jersey_storefront::catalog::fallback_products;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

/// Reply the mock sends for every contact message.
pub const CONTACT_REPLY: &str = "Thank you! Your message has been sent.";

/// A canned failure for `POST /api/orders`.
#[derive(Debug, Clone)]
pub struct OrderFailure {
    pub status: StatusCode,
    pub body: Value,
}

#[derive(Default)]
struct MockState {
    products: Vec<Product>,
    orders: HashMap<String, OrderRecord>,
    order_requests: Vec<OrderRequest>,
    contacts: Vec<ContactMessage>,
    order_failure: Option<OrderFailure>,
    next_order: u64,
}

type Shared = Arc<Mutex<MockState>>;

/// In-process stand-in for the store backend.
///
/// The server task stops when the value is dropped.
pub struct MockBackend {
    base_url: Url,
    state: Shared,
    handle: JoinHandle<()>,
}

impl MockBackend {
    /// Start a backend serving the three featured products.
    ///
    /// # Errors
    ///
    /// Returns an error if no loopback port can be bound.
    pub async fn start() -> std::io::Result<Self> {
        Self::with_products(fallback_products()).await
    }

    /// Start a backend serving `products`.
    ///
    /// # Errors
    ///
    /// Returns an error if no loopback port can be bound.
    pub async fn with_products(products: Vec<Product>) -> std::io::Result<Self> {
        let state: Shared = Arc::new(Mutex::new(MockState {
            products,
            ..MockState::default()
        }));

        let router = Router::new()
            .route("/api/products", get(list_products))
            .route("/api/products/{id}", get(get_product))
            .route("/api/orders", post(place_order))
            .route("/api/orders/{order_id}", get(get_order))
            .route("/api/contact", post(submit_contact))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let base_url = Url::parse(&format!("http://{addr}"))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!(error = %e, "Mock backend stopped");
            }
        });

        Ok(Self {
            base_url,
            state,
            handle,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// A storefront client pointed at this backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn client(&self) -> Result<StoreApiClient, ApiError> {
        StoreApiClient::with_base_url(self.base_url.clone(), Some(Duration::from_secs(5)))
    }

    /// Make every subsequent order fail with `status` and `body`.
    pub fn fail_orders(&self, status: StatusCode, body: Value) {
        lock(&self.state).order_failure = Some(OrderFailure { status, body });
    }

    /// Orders accepted or rejected so far, in arrival order.
    #[must_use]
    pub fn order_requests(&self) -> Vec<OrderRequest> {
        lock(&self.state).order_requests.clone()
    }

    /// Contact messages received so far.
    #[must_use]
    pub fn contacts(&self) -> Vec<ContactMessage> {
        lock(&self.state).contacts.clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A base URL nothing listens on.
///
/// # Errors
///
/// Returns an error if no loopback port can be bound.
pub async fn unreachable_base_url() -> std::io::Result<Url> {
    // Bind then drop so the port is free and refuses connections
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Url::parse(&format!("http://{addr}"))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
}

fn lock(state: &Shared) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

// =============================================================================
// Handlers
// =============================================================================

async fn list_products(State(state): State<Shared>) -> Json<Vec<Product>> {
    Json(lock(&state).products.clone())
}

async fn get_product(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let product = lock(&state)
        .products
        .iter()
        .find(|p| p.id.as_str() == id)
        .cloned();
    product.map_or_else(
        || detail(StatusCode::NOT_FOUND, "Product not found"),
        |p| Json(p).into_response(),
    )
}

async fn place_order(State(state): State<Shared>, Json(order): Json<OrderRequest>) -> Response {
    let mut mock = lock(&state);
    mock.order_requests.push(order.clone());

    if let Some(failure) = mock.order_failure.clone() {
        return (failure.status, Json(failure.body)).into_response();
    }
    if order.items.is_empty() {
        return detail(StatusCode::BAD_REQUEST, "Cart is empty");
    }

    mock.next_order += 1;
    let order_id = format!("JS-{}-{}", 1_700_000_000_000_u64 + mock.next_order, 123);
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .ok();

    mock.orders.insert(
        order_id.clone(),
        OrderRecord {
            order_id: OrderId::new(order_id.as_str()),
            items: order.items,
            total_amount: order.total_amount,
            customer_name: order.customer.name,
            customer_email: order.customer.email,
            customer_phone: order.customer.phone,
            customer_address: order.customer.address,
            status: OrderStatus::Received,
            timestamp,
        },
    );

    Json(json!({
        "success": true,
        "order_id": order_id,
        "redirect_url": format!("/order-confirmation/{order_id}"),
    }))
    .into_response()
}

async fn get_order(State(state): State<Shared>, Path(order_id): Path<String>) -> Response {
    let order = lock(&state).orders.get(&order_id).cloned();
    order.map_or_else(
        || detail(StatusCode::NOT_FOUND, "Order not found"),
        |o| Json(o).into_response(),
    )
}

async fn submit_contact(
    State(state): State<Shared>,
    Form(message): Form<ContactMessage>,
) -> Json<Value> {
    lock(&state).contacts.push(message);
    Json(json!({ "success": true, "message": CONTACT_REPLY }))
}
