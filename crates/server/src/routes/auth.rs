//! Account route handlers: signup and the two sign-in paths.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};

use super::{MessageResponse, Required};
use crate::db::AccountTable;
use crate::error::Result;
use crate::extract::ApiJson;
use crate::models::Account;
use crate::services::auth::{AuthService, Registration};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/signin-admin", post(signin_admin))
}

// =============================================================================
// Request / Response Types
// =============================================================================

/// Signup form data.
#[derive(Debug, Default, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "Confirm_Password")]
    pub confirm_password: Option<String>,
}

/// Sign-in form data.
#[derive(Debug, Default, Deserialize)]
pub struct SignInRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful sign-in. The account sits under `admin` on both paths.
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub message: String,
    pub admin: Account,
}

// =============================================================================
// Handlers
// =============================================================================

/// Register a customer account.
///
/// # Errors
///
/// Returns 400 for missing fields, an invalid email or a confirmation
/// mismatch, 409 if the email or phone is taken.
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SignupRequest>,
) -> Result<Json<MessageResponse>> {
    let mut required = Required::default();
    let name = required.text("name", body.name);
    let email = required.text("email", body.email);
    let phone = required.text("phone", body.phone);
    let password = required.value("password", body.password.filter(|p| !p.is_empty()));
    let confirm_password = required.value("Confirm_Password", body.confirm_password);

    let (Some(name), Some(email), Some(phone), Some(password), Some(confirm_password)) =
        (name, email, phone, password, confirm_password)
    else {
        return Err(required.into_error());
    };

    AuthService::new(state.pool(), AccountTable::Customer, state.hasher())
        .register(Registration {
            name: &name,
            email: &email,
            phone: &phone,
            password: &password,
            confirm_password: &confirm_password,
        })
        .await?;

    Ok(Json(MessageResponse::new(
        "Signup successful! Go to SignIn page.",
    )))
}

/// Customer sign-in.
///
/// # Errors
///
/// Returns 401 if no customer account matches.
pub async fn signin(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SignInRequest>,
) -> Result<Json<SignInResponse>> {
    let admin = sign_in(&state, AccountTable::Customer, body).await?;

    Ok(Json(SignInResponse {
        message: "Login Successful!".to_owned(),
        admin,
    }))
}

/// Administrator sign-in.
///
/// # Errors
///
/// Returns 401 if no administrator account matches.
pub async fn signin_admin(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SignInRequest>,
) -> Result<Json<SignInResponse>> {
    let admin = sign_in(&state, AccountTable::Admin, body).await?;

    Ok(Json(SignInResponse {
        message: "Login Successful! Redirecting to Admin Page".to_owned(),
        admin,
    }))
}

/// Missing fields are reported as bad credentials, not as a 400.
async fn sign_in(state: &AppState, table: AccountTable, body: SignInRequest) -> Result<Account> {
    let email = body.email.unwrap_or_default();
    let password = body.password.unwrap_or_default();

    let account = AuthService::new(state.pool(), table, state.hasher())
        .sign_in(&email, &password)
        .await
        .inspect_err(|e| tracing::info!(table = table.table_name(), error = %e, "Sign-in rejected"))?;

    tracing::info!(
        table = table.table_name(),
        account_id = %account.id,
        "Sign-in succeeded"
    );
    Ok(account)
}
