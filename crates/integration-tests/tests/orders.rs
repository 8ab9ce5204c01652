//! Checkout and order management against `PostgreSQL`.
//!
//! Run with: `TEST_DATABASE_URL=... cargo test -p shopdesk-integration-tests -- --ignored`

use axum::http::StatusCode;
use serde_json::{Value, json};
use shopdesk_integration_tests::{TestApp, unique_suffix};

async fn create_product(app: &TestApp) -> i64 {
    let resp = app
        .post(
            "/products",
            json!({"Product_name": format!("Mug {}", unique_suffix()), "Price": "9.99"}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    resp.body["id"].as_i64().unwrap()
}

fn checkout(product_id: i64, user_name: &str) -> Value {
    json!({
        "product_id": product_id,
        "user_name": user_name,
        "phone_number": "555-0101",
        "product_name": "Mug",
        "product_image_url": "https://cdn.shop.test/mug.png",
        "product_description": "Stoneware",
        "product_price": "9.99",
        "address": "12 Hill Rd",
        "payment_method": "COD"
    })
}

async fn place(app: &TestApp, body: Value) -> i64 {
    let resp = app.post("/api/orders", body).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.message(), "Order Saved Successfully!");
    resp.body["orderId"].as_i64().unwrap()
}

fn find(list: &Value, id: i64) -> Option<&Value> {
    list.as_array()
        .unwrap()
        .iter()
        .find(|o| o["id"].as_i64() == Some(id))
}

fn position(list: &Value, id: i64) -> usize {
    list.as_array()
        .unwrap()
        .iter()
        .position(|o| o["id"].as_i64() == Some(id))
        .unwrap()
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_orders_list_newest_first() {
    let app = TestApp::connected().await;
    let product_id = create_product(&app).await;

    let first = place(&app, checkout(product_id, "First")).await;
    let second = place(&app, checkout(product_id, "Second")).await;
    let third = place(&app, checkout(product_id, "Third")).await;

    let list = app.get("/api/orders").await.body;
    assert!(position(&list, third) < position(&list, second));
    assert!(position(&list, second) < position(&list, first));

    let ids: Vec<i64> = list
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|o| o["id"].as_i64())
        .collect();
    assert!(ids.windows(2).all(|w| w[0] > w[1]));

    let order = find(&list, first).unwrap();
    assert_eq!(order["user_name"], "First");
    assert_eq!(order["price"], "9.99");
    assert_eq!(order["product_url"], "https://cdn.shop.test/mug.png");
    assert!(order["created_at"].is_string());
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_order_keeps_checkout_snapshot() {
    let app = TestApp::connected().await;
    let product_id = create_product(&app).await;
    let order_id = place(&app, checkout(product_id, "Snapshot")).await;

    let resp = app
        .put(
            &format!("/products/{product_id}"),
            json!({"Product_name": "Renamed Mug", "Price": "19.99"}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);

    let list = app.get("/api/orders").await.body;
    let order = find(&list, order_id).unwrap();
    assert_eq!(order["product_name"], "Mug");
    assert_eq!(order["price"], "9.99");

    // Deleting the product leaves the order in place.
    let resp = app.delete(&format!("/products/{product_id}")).await;
    assert_eq!(resp.status, StatusCode::OK);

    let list = app.get("/api/orders").await.body;
    let order = find(&list, order_id).unwrap();
    assert!(order["product_id"].is_null());
    assert_eq!(order["product_name"], "Mug");
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_update_touches_only_customer_fields() {
    let app = TestApp::connected().await;
    let product_id = create_product(&app).await;
    let order_id = place(&app, checkout(product_id, "Before")).await;

    let resp = app
        .put(
            &format!("/api/orders/{order_id}"),
            json!({
                "user_name": "After",
                "phone_number": "555-0199",
                "address": "9 New St",
                "payment_method": "Card",
                "product_price": "0.01"
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.message(),
        format!("Order ID {order_id} updated successfully.")
    );

    let list = app.get("/api/orders").await.body;
    let order = find(&list, order_id).unwrap();
    assert_eq!(order["user_name"], "After");
    assert_eq!(order["phone"], "555-0199");
    assert_eq!(order["address"], "9 New St");
    assert_eq!(order["payment_method"], "Card");
    assert_eq!(order["price"], "9.99");
    assert_eq!(order["product_name"], "Mug");
    assert_eq!(order["product_id"].as_i64(), Some(product_id));
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_update_cannot_clear_required_columns() {
    let app = TestApp::connected().await;
    let product_id = create_product(&app).await;
    let order_id = place(&app, checkout(product_id, "Keep")).await;

    let resp = app
        .put(&format!("/api/orders/{order_id}"), json!({"phone_number": "555-0000"}))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.message(), "Missing required field");
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_order_for_unknown_product_is_400() {
    let app = TestApp::connected().await;
    let resp = app
        .post("/api/orders", checkout(2_147_483_647, "Nobody"))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.message(), "Referenced product does not exist");
    assert!(!resp.message().contains("fkey"));
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_missing_order_is_404() {
    let app = TestApp::connected().await;

    let resp = app
        .put("/api/orders/2147483647", json!({"user_name": "Ghost", "address": "Nowhere"}))
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.message(), "Order not found.");

    let resp = app.delete("/api/orders/2147483647").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_delete_order_twice() {
    let app = TestApp::connected().await;
    let product_id = create_product(&app).await;
    let order_id = place(&app, checkout(product_id, "Gone")).await;

    let resp = app.delete(&format!("/api/orders/{order_id}")).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.message(),
        format!("Order ID {order_id} deleted successfully.")
    );

    let resp = app.delete(&format!("/api/orders/{order_id}")).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
