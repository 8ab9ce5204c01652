//! Signup and sign-in against `PostgreSQL`.
//!
//! Run with: `TEST_DATABASE_URL=... cargo test -p shopdesk-integration-tests -- --ignored`

use axum::http::StatusCode;
use serde_json::{Value, json};
use shopdesk_integration_tests::{TestApp, unique_suffix};
use shopdesk_server::db::AccountTable;
use shopdesk_server::services::auth::{Argon2Hasher, AuthService, Registration};

fn signup_body(suffix: &str) -> Value {
    json!({
        "name": "Mei Tanaka",
        "email": format!("mei.{suffix}@shop.test"),
        "phone": format!("555-{suffix}"),
        "password": "hunter22",
        "Confirm_Password": "hunter22"
    })
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_signup_then_signin() {
    let app = TestApp::connected().await;
    let suffix = unique_suffix();
    let email = format!("mei.{suffix}@shop.test");

    let resp = app.post("/signup", signup_body(&suffix)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.message(), "Signup successful! Go to SignIn page.");

    let resp = app
        .post("/signin", json!({"email": email, "password": "hunter22"}))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.message(), "Login Successful!");
    assert_eq!(resp.body["admin"]["email"], email.as_str());
    assert_eq!(resp.body["admin"]["name"], "Mei Tanaka");
    assert!(resp.body["admin"].get("password_hash").is_none());
    assert!(resp.body["admin"].get("password").is_none());
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_stored_password_is_hashed() {
    let app = TestApp::connected().await;
    let suffix = unique_suffix();
    let email = format!("mei.{suffix}@shop.test");

    let resp = app.post("/signup", signup_body(&suffix)).await;
    assert_eq!(resp.status, StatusCode::OK);

    let stored: String = sqlx::query_scalar("SELECT password_hash FROM signup WHERE email = $1")
        .bind(&email)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_ne!(stored, "hunter22");
    assert!(stored.starts_with("$argon2id$"));
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_duplicate_signup_is_409() {
    let app = TestApp::connected().await;
    let suffix = unique_suffix();

    let resp = app.post("/signup", signup_body(&suffix)).await;
    assert_eq!(resp.status, StatusCode::OK);

    let resp = app.post("/signup", signup_body(&suffix)).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM signup WHERE phone = $1")
        .bind(format!("555-{suffix}"))
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_wrong_password_is_401() {
    let app = TestApp::connected().await;
    let suffix = unique_suffix();
    let email = format!("mei.{suffix}@shop.test");
    app.post("/signup", signup_body(&suffix)).await;

    let resp = app
        .post("/signin", json!({"email": email, "password": "hunter23"}))
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert!(resp.body.get("admin").is_none());

    let resp = app
        .post(
            "/signin",
            json!({"email": format!("nobody.{suffix}@shop.test"), "password": "hunter22"}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_account_tables_are_separate() {
    let app = TestApp::connected().await;
    let suffix = unique_suffix();
    let customer_email = format!("mei.{suffix}@shop.test");
    let admin_email = format!("ops.{suffix}@shop.test");

    app.post("/signup", signup_body(&suffix)).await;

    let hasher = Argon2Hasher;
    AuthService::new(&app.pool, AccountTable::Admin, &hasher)
        .register(Registration {
            name: "Ops",
            email: &admin_email,
            phone: &format!("556-{suffix}"),
            password: "admin-pass",
            confirm_password: "admin-pass",
        })
        .await
        .unwrap();

    // A customer cannot use the admin path, and vice versa.
    let resp = app
        .post(
            "/signin-admin",
            json!({"email": customer_email, "password": "hunter22"}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);

    let resp = app
        .post("/signin", json!({"email": admin_email, "password": "admin-pass"}))
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);

    let resp = app
        .post(
            "/signin-admin",
            json!({"email": admin_email, "password": "admin-pass"}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.message(),
        "Login Successful! Redirecting to Admin Page"
    );
    assert_eq!(resp.body["admin"]["email"], admin_email.as_str());
}
