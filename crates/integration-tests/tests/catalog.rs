//! Catalog round trips against `PostgreSQL`.
//!
//! Run with: `TEST_DATABASE_URL=... cargo test -p shopdesk-integration-tests -- --ignored`

use axum::http::StatusCode;
use serde_json::{Value, json};
use shopdesk_integration_tests::{TestApp, unique_suffix};

async fn create_lamp(app: &TestApp, name: &str) -> i64 {
    let resp = app
        .post(
            "/products",
            json!({
                "Product_name": name,
                "Price": "24.50",
                "Image": "https://cdn.shop.test/lamp.png",
                "Category": "Lighting",
                "Description": "Brass desk lamp"
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.message(), "Product Added Successfully!");
    resp.body["id"].as_i64().unwrap()
}

fn find(list: &Value, id: i64) -> Option<&Value> {
    list.as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"].as_i64() == Some(id))
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_create_then_list() {
    let app = TestApp::connected().await;
    let name = format!("Lamp {}", unique_suffix());
    let id = create_lamp(&app, &name).await;

    let resp = app.get("/products").await;
    assert_eq!(resp.status, StatusCode::OK);

    let product = find(&resp.body, id).unwrap();
    assert_eq!(product["Product_name"], name.as_str());
    assert_eq!(product["Price"], "24.50");
    assert_eq!(product["Category"], "Lighting");
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_update_replaces_every_field() {
    let app = TestApp::connected().await;
    let id = create_lamp(&app, &format!("Lamp {}", unique_suffix())).await;

    let resp = app
        .put(
            &format!("/products/{id}"),
            json!({"Product_name": "Floor Lamp", "Price": 80}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.message(), "Product Updated Successfully!");

    let list = app.get("/products").await.body;
    let product = find(&list, id).unwrap();
    assert_eq!(product["Product_name"], "Floor Lamp");
    assert_eq!(product["Price"], "80.00");
    // Omitted fields are cleared, not kept.
    assert!(product["Image"].is_null());
    assert!(product["Category"].is_null());
    assert!(product["Description"].is_null());
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_price_reads_back_as_submitted() {
    let app = TestApp::connected().await;
    let name = format!("Chandelier {}", unique_suffix());

    let resp = app
        .post("/products", json!({"Product_name": name, "Price": "9999999999.99"}))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    let id = resp.body["id"].as_i64().unwrap();

    let resp = app.get("/products").await;
    assert_eq!(find(&resp.body, id).unwrap()["Price"], "9999999999.99");

    let rounded = format!("Rounded {}", unique_suffix());
    let resp = app
        .post("/products", json!({"Product_name": rounded, "Price": "24.555"}))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = app.get("/products").await;
    let products = resp.body.as_array().unwrap();
    assert!(!products.iter().any(|p| p["Product_name"] == rounded.as_str()));
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_missing_product_is_404() {
    let app = TestApp::connected().await;

    let resp = app
        .put("/products/2147483647", json!({"Product_name": "Ghost"}))
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.message(), "Product not found");

    let resp = app.delete("/products/2147483647").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_second_delete_is_404() {
    let app = TestApp::connected().await;
    let id = create_lamp(&app, &format!("Lamp {}", unique_suffix())).await;

    let resp = app.delete(&format!("/products/{id}")).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.message(), "Product Deleted Successfully!");

    let resp = app.delete(&format!("/products/{id}")).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let list = app.get("/products").await.body;
    assert!(find(&list, id).is_none());
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_readiness_with_database() {
    let app = TestApp::connected().await;
    let resp = app.get("/health/ready").await;
    assert_eq!(resp.status, StatusCode::OK);
}
