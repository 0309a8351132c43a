//! Integration tests for the API server.

use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use catalog::{InMemoryCatalog, Product};
use common::{Money, ProductId};
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::InMemoryOrderStore;
use publisher::InMemoryPublisher;
use tower::ServiceExt;
use workflow::OrderWorkflow;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

struct Harness {
    app: axum::Router,
    catalog: InMemoryCatalog,
    store: InMemoryOrderStore,
    publisher: InMemoryPublisher,
}

fn setup() -> Harness {
    let catalog = InMemoryCatalog::with_products([
        Product::new("SKU-001", "Widget", Money::from_cents(1000), 5),
        Product::new("SKU-002", "Gadget", Money::from_cents(3000), 10),
    ]);
    let store = InMemoryOrderStore::new();
    let publisher = InMemoryPublisher::new();

    let workflow = OrderWorkflow::new(
        catalog.clone(),
        store.clone(),
        Arc::new(publisher.clone()),
    );
    let state = Arc::new(api::AppState { workflow });
    let app = api::create_app(state, get_metrics_handle());

    Harness {
        app,
        catalog,
        store,
        publisher,
    }
}

async fn post_json(
    app: &axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, Some(body)).await
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, None).await
}

async fn patch_json(
    app: &axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "PATCH", uri, Some(body)).await
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Publication is spawned off the request path, so tests poll for it.
async fn wait_for_publish(publisher: &InMemoryPublisher, count: usize) {
    for _ in 0..100 {
        if publisher.publish_count() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("expected {count} published payload(s), saw {}", publisher.publish_count());
}

#[tokio::test]
async fn test_health_check() {
    let h = setup();

    let (status, json) = get_json(&h.app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let h = setup();

    let response = h
        .app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("text/plain"));
}

#[tokio::test]
async fn test_place_order() {
    let h = setup();

    let (status, json) = post_json(
        &h.app,
        "/orders",
        serde_json::json!({
            "customerEmail": "jo@example.com",
            "items": [{ "productId": "SKU-001", "quantity": 3 }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(json["id"].as_str().is_some());
    assert_eq!(json["customerEmail"], "jo@example.com");
    assert_eq!(json["status"], "PENDING");
    assert_eq!(json["totalAmount"], 3000);
    assert!(json["createdAt"].as_str().is_some());

    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["productId"], "SKU-001");
    assert_eq!(items[0]["name"], "Widget");
    assert_eq!(items[0]["quantity"], 3);
    assert_eq!(items[0]["unitPrice"], 1000);

    // Stock is decremented after the order is persisted.
    assert_eq!(h.catalog.stock_of(&ProductId::new("SKU-001")).await, Some(2));

    // The order-created notification goes out on a detached task.
    wait_for_publish(&h.publisher, 1).await;
    let payload = &h.publisher.published()[0];
    assert_eq!(payload.order_id.to_string(), json["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_place_order_without_email() {
    let h = setup();

    let (status, json) = post_json(
        &h.app,
        "/orders",
        serde_json::json!({
            "items": [{ "productId": "SKU-002", "quantity": 1 }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(json["customerEmail"].is_null());
    assert_eq!(json["totalAmount"], 3000);
}

#[tokio::test]
async fn test_place_order_multiple_lines() {
    let h = setup();

    let (status, json) = post_json(
        &h.app,
        "/orders",
        serde_json::json!({
            "items": [
                { "productId": "SKU-001", "quantity": 2 },
                { "productId": "SKU-002", "quantity": 1 }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["totalAmount"], 5000);
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
    assert_eq!(h.catalog.stock_of(&ProductId::new("SKU-001")).await, Some(3));
    assert_eq!(h.catalog.stock_of(&ProductId::new("SKU-002")).await, Some(9));
}

#[tokio::test]
async fn test_place_order_empty_items() {
    let h = setup();

    let (status, json) = post_json(&h.app, "/orders", serde_json::json!({ "items": [] })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Order must contain at least one item");
    assert_eq!(h.store.order_count().await, 0);
}

#[tokio::test]
async fn test_place_order_missing_items_field() {
    let h = setup();

    let (status, json) = post_json(&h.app, "/orders", serde_json::json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Order must contain at least one item");
    assert_eq!(h.store.order_count().await, 0);
}

#[tokio::test]
async fn test_place_order_unknown_product() {
    let h = setup();

    let (status, json) = post_json(
        &h.app,
        "/orders",
        serde_json::json!({
            "items": [{ "productId": "SKU-404", "quantity": 1 }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Product not found: SKU-404");
    assert_eq!(h.store.order_count().await, 0);
}

#[tokio::test]
async fn test_place_order_insufficient_stock() {
    let h = setup();

    let (status, json) = post_json(
        &h.app,
        "/orders",
        serde_json::json!({
            "items": [{ "productId": "SKU-001", "quantity": 6 }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Not enough stock for product: SKU-001");
    assert_eq!(h.store.order_count().await, 0);
    assert_eq!(h.catalog.stock_of(&ProductId::new("SKU-001")).await, Some(5));
}

#[tokio::test]
async fn test_place_order_non_positive_quantity() {
    let h = setup();

    let (status, json) = post_json(
        &h.app,
        "/orders",
        serde_json::json!({
            "items": [{ "productId": "SKU-001", "quantity": 0 }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid quantity for product: SKU-001");
    assert_eq!(h.store.order_count().await, 0);
}

#[tokio::test]
async fn test_place_order_publish_failure_still_succeeds() {
    let h = setup();
    h.publisher.set_fail_on_publish(true);

    let (status, _) = post_json(
        &h.app,
        "/orders",
        serde_json::json!({
            "items": [{ "productId": "SKU-001", "quantity": 1 }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(h.store.order_count().await, 1);
    assert_eq!(h.catalog.stock_of(&ProductId::new("SKU-001")).await, Some(4));
}

#[tokio::test]
async fn test_create_and_get_order() {
    let h = setup();

    let (_, created) = post_json(
        &h.app,
        "/orders",
        serde_json::json!({
            "items": [{ "productId": "SKU-001", "quantity": 2 }]
        }),
    )
    .await;
    let order_id = created["id"].as_str().unwrap();

    let (status, order) = get_json(&h.app, &format!("/orders/{order_id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["id"], order_id);
    assert_eq!(order["status"], "PENDING");
    assert_eq!(order["totalAmount"], 2000);
    assert_eq!(order["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_nonexistent_order() {
    let h = setup();
    let fake_id = uuid::Uuid::new_v4();

    let (status, _) = get_json(&h.app, &format!("/orders/{fake_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_order_id_format() {
    let h = setup();

    let (status, _) = get_json(&h.app, "/orders/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let h = setup();

    let (_, first) = post_json(
        &h.app,
        "/orders",
        serde_json::json!({
            "items": [{ "productId": "SKU-001", "quantity": 1 }]
        }),
    )
    .await;
    let (_, second) = post_json(
        &h.app,
        "/orders",
        serde_json::json!({
            "items": [{ "productId": "SKU-002", "quantity": 1 }]
        }),
    )
    .await;

    let (status, json) = get_json(&h.app, "/orders").await;

    assert_eq!(status, StatusCode::OK);
    let orders = json.as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["id"], second["id"]);
    assert_eq!(orders[1]["id"], first["id"]);
}

#[tokio::test]
async fn test_update_status_case_insensitive() {
    let h = setup();

    let (_, created) = post_json(
        &h.app,
        "/orders",
        serde_json::json!({
            "items": [{ "productId": "SKU-001", "quantity": 1 }]
        }),
    )
    .await;
    let uri = format!("/orders/{}", created["id"].as_str().unwrap());

    let (status, json) = patch_json(&h.app, &uri, serde_json::json!({ "status": "completed" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "COMPLETED");

    let (status, json) = patch_json(&h.app, &uri, serde_json::json!({ "status": "Cancelled" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "CANCELLED");

    // Terminal states are not sticky; the update is permissive.
    let (status, json) = patch_json(&h.app, &uri, serde_json::json!({ "status": "PENDING" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "PENDING");
}

#[tokio::test]
async fn test_update_status_invalid_value() {
    let h = setup();

    let (_, created) = post_json(
        &h.app,
        "/orders",
        serde_json::json!({
            "items": [{ "productId": "SKU-001", "quantity": 1 }]
        }),
    )
    .await;
    let uri = format!("/orders/{}", created["id"].as_str().unwrap());

    let (status, json) = patch_json(&h.app, &uri, serde_json::json!({ "status": "SHIPPED" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid status: SHIPPED");

    // The stored order is untouched.
    let (_, order) = get_json(&h.app, &uri).await;
    assert_eq!(order["status"], "PENDING");
}

#[tokio::test]
async fn test_update_status_nonexistent_order() {
    let h = setup();
    let fake_id = uuid::Uuid::new_v4();

    let (status, _) = patch_json(
        &h.app,
        &format!("/orders/{fake_id}"),
        serde_json::json!({ "status": "COMPLETED" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
