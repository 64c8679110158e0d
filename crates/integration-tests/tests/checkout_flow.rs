//! End-to-end checkout against the mock backend.
//!
//! Covers the durable cart (file storage) through order placement: a
//! confirmed order empties the cart, a rejected one leaves it untouched.

use std::str::FromStr;

use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;
use sports_jersey_core::{CART_STORAGE_KEY, CartStorage, CartStore, KeyMode, PaymentMethod};
use sports_jersey_integration_tests::{MockBackend, unreachable_base_url};
use sports_jersey_storefront::api::{ApiError, CustomerDetails, StoreApiClient};
use sports_jersey_storefront::catalog::{CatalogSource, load_catalog};
use sports_jersey_storefront::checkout::{CheckoutError, submit_order};
use sports_jersey_storefront::error::AppError;
use sports_jersey_storefront::storage::FileStorage;

fn customer() -> CustomerDetails {
    CustomerDetails {
        name: "Ada Obi".to_string(),
        email: "ada@example.com".to_string(),
        phone: Some("+2348000000000".to_string()),
        address: Some("12 Marina Road".to_string()),
        city: Some("Lagos".to_string()),
        zip_code: Some("101001".to_string()),
        country: Some("Nigeria".to_string()),
    }
}

/// Fill a file-backed cart from the backend catalog.
async fn filled_cart(
    client: &StoreApiClient,
    dir: &std::path::Path,
) -> CartStore<FileStorage> {
    let catalog = load_catalog(client).await;
    assert_eq!(catalog.source, CatalogSource::Api);

    let storage = FileStorage::open(dir).expect("Failed to open storage");
    let mut store = CartStore::load(storage, KeyMode::SizeAware);
    let jersey = catalog.find("prod1").expect("prod1 in catalog").to_candidate();
    let jeans = catalog.find("prod2").expect("prod2 in catalog").to_candidate();

    store.add(jersey.clone(), Some("M"));
    store.add(jersey, Some("M"));
    store.add(jeans, None);
    store
}

#[tokio::test]
async fn test_successful_checkout_clears_cart_and_storage() {
    let backend = MockBackend::start().await.expect("Failed to start backend");
    let client = backend.client().expect("Failed to build client");
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let mut store = filled_cart(&client, dir.path()).await;
    assert_eq!(store.item_count(), 3);

    let confirmation = submit_order(&client, &mut store, customer(), PaymentMethod::Card)
        .await
        .expect("Order should succeed");

    assert!(confirmation.success);
    let order_id = confirmation.order_id.expect("order id");
    assert_eq!(
        confirmation.redirect_url.as_deref(),
        Some(format!("/order-confirmation/{order_id}").as_str())
    );

    assert!(store.is_empty());
    assert_eq!(store.storage().get(CART_STORAGE_KEY), None);
    assert!(!store.storage().path_for(CART_STORAGE_KEY).exists());

    // A fresh session sees the empty cart too
    let reopened = CartStore::load(
        FileStorage::open(dir.path()).expect("Failed to reopen storage"),
        KeyMode::SizeAware,
    );
    assert!(reopened.is_empty());
}

#[tokio::test]
async fn test_order_body_matches_cart() {
    let backend = MockBackend::start().await.expect("Failed to start backend");
    let client = backend.client().expect("Failed to build client");
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let mut store = filled_cart(&client, dir.path()).await;
    let expected_total = store.totals().total;

    submit_order(&client, &mut store, customer(), PaymentMethod::BankTransfer)
        .await
        .expect("Order should succeed");

    let requests = backend.order_requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    assert_eq!(request.items.len(), 2);
    assert_eq!(request.items[0].id.as_str(), "prod1");
    assert_eq!(request.items[0].size, "M");
    assert_eq!(request.items[0].quantity, 2);
    assert_eq!(request.items[1].size, "N/A");
    assert_eq!(request.customer.name, "Ada Obi");
    assert_eq!(request.customer.city.as_deref(), Some("Lagos"));
    assert_eq!(request.payment_method, PaymentMethod::BankTransfer);

    // 2 x 49.99 + 79.99 = 179.97, + 1000 shipping + 7.5% tax.
    // The wire format is a JSON number, so compare at cent precision.
    assert_eq!(
        request.total_amount.amount().round_dp(2),
        expected_total.round_dp(2)
    );
    assert_eq!(
        expected_total,
        Decimal::from_str("1193.46775").expect("decimal")
    );
}

#[tokio::test]
async fn test_rejected_order_keeps_cart_and_surfaces_detail() {
    let backend = MockBackend::start().await.expect("Failed to start backend");
    backend.fail_orders(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "detail": "Payment gateway unavailable" }),
    );
    let client = backend.client().expect("Failed to build client");
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let mut store = filled_cart(&client, dir.path()).await;
    let items_before = store.items().to_vec();
    let stored_before = store.storage().get(CART_STORAGE_KEY);

    let err = submit_order(&client, &mut store, customer(), PaymentMethod::Card)
        .await
        .expect_err("Order should fail");

    match &err {
        CheckoutError::Api(ApiError::Api { status, detail }) => {
            assert_eq!(*status, 500);
            assert_eq!(detail, "Payment gateway unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        AppError::from(err).user_message(),
        "Payment gateway unavailable"
    );

    assert_eq!(store.items(), items_before.as_slice());
    assert_eq!(store.storage().get(CART_STORAGE_KEY), stored_before);
}

#[tokio::test]
async fn test_rejected_order_without_detail_uses_fallback_message() {
    let backend = MockBackend::start().await.expect("Failed to start backend");
    backend.fail_orders(StatusCode::BAD_GATEWAY, json!({ "error": "upstream" }));
    let client = backend.client().expect("Failed to build client");
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let mut store = filled_cart(&client, dir.path()).await;
    let err = submit_order(&client, &mut store, customer(), PaymentMethod::Card)
        .await
        .expect_err("Order should fail");

    assert!(matches!(
        err,
        CheckoutError::Api(ApiError::Api { status: 502, ref detail }) if detail == "Failed to place order"
    ));
    assert_eq!(store.item_count(), 3);
}

#[tokio::test]
async fn test_failed_order_can_be_resubmitted() {
    let backend = MockBackend::start().await.expect("Failed to start backend");
    let client = backend.client().expect("Failed to build client");
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut store = filled_cart(&client, dir.path()).await;

    let offline = StoreApiClient::with_base_url(
        unreachable_base_url().await.expect("Failed to pick port"),
        None,
    )
    .expect("Failed to build client");
    let err = submit_order(&offline, &mut store, customer(), PaymentMethod::Card)
        .await
        .expect_err("Order should fail while offline");
    assert!(matches!(err, CheckoutError::Api(ApiError::Http(_))));
    assert_eq!(store.item_count(), 3);

    submit_order(&client, &mut store, customer(), PaymentMethod::Card)
        .await
        .expect("Resubmitted order should succeed");
    assert!(store.is_empty());
    assert_eq!(backend.order_requests().len(), 1);
}

#[tokio::test]
async fn test_empty_cart_never_reaches_backend() {
    let backend = MockBackend::start().await.expect("Failed to start backend");
    let client = backend.client().expect("Failed to build client");
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let storage = FileStorage::open(dir.path()).expect("Failed to open storage");
    let mut store = CartStore::load(storage, KeyMode::SizeAware);

    let err = submit_order(&client, &mut store, customer(), PaymentMethod::Card)
        .await
        .expect_err("Empty cart should be rejected");

    assert!(matches!(err, CheckoutError::EmptyCart));
    assert!(backend.order_requests().is_empty());
}
