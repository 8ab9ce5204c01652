//! Order route handlers.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};

use shopdesk_core::{OrderId, Price, ProductId};

use super::{MessageResponse, Required};
use crate::db::{OrderRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiPath};
use crate::models::{CustomerDetails, NewOrder, Order};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(list).post(create))
        .route("/api/orders/{id}", put(update).delete(delete))
}

// =============================================================================
// Request / Response Types
// =============================================================================

/// Checkout payload sent by the shop front end.
#[derive(Debug, Default, Deserialize)]
pub struct CreateOrderRequest {
    pub product_id: Option<ProductId>,
    pub user_name: Option<String>,
    pub phone_number: Option<String>,
    pub product_name: Option<String>,
    pub product_image_url: Option<String>,
    pub product_description: Option<String>,
    pub product_price: Option<Price>,
    pub address: Option<String>,
    pub payment_method: Option<String>,
}

impl TryFrom<CreateOrderRequest> for NewOrder {
    type Error = AppError;

    fn try_from(req: CreateOrderRequest) -> Result<Self> {
        let mut required = Required::default();
        let product_id = required.value("product_id", req.product_id);
        let user_name = required.text("user_name", req.user_name);
        let address = required.text("address", req.address);
        let price = required.value("product_price", req.product_price);

        let (Some(product_id), Some(user_name), Some(address), Some(price)) =
            (product_id, user_name, address, price)
        else {
            return Err(required.into_error());
        };

        Ok(Self {
            product_id,
            user_name,
            phone: req.phone_number,
            product_name: req.product_name,
            product_url: req.product_image_url,
            description: req.product_description,
            price,
            address,
            payment_method: req.payment_method,
        })
    }
}

/// Order edit payload. Only customer and shipping fields are accepted;
/// product and price keys in the body are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrderRequest {
    pub user_name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub payment_method: Option<String>,
}

impl From<UpdateOrderRequest> for CustomerDetails {
    fn from(req: UpdateOrderRequest) -> Self {
        Self {
            user_name: req.user_name,
            phone: req.phone_number,
            address: req.address,
            payment_method: req.payment_method,
        }
    }
}

/// Response for a saved order.
#[derive(Debug, Serialize)]
pub struct OrderCreatedResponse {
    pub message: String,
    #[serde(rename = "orderId")]
    pub order_id: OrderId,
}

fn not_found(err: RepositoryError) -> AppError {
    match err {
        RepositoryError::NotFound => AppError::NotFound("Order not found.".to_owned()),
        other => other.into(),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Save a checkout.
///
/// # Errors
///
/// Returns 400 if a required field is missing or `product_id` names no
/// product, 500 if the insert fails.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateOrderRequest>,
) -> Result<Json<OrderCreatedResponse>> {
    let order = NewOrder::try_from(body)?;

    let outcome = OrderRepository::new(state.pool()).create(&order).await?;
    let order_id = outcome
        .insert_id
        .map(OrderId::new)
        .ok_or_else(|| AppError::Internal("insert returned no id".to_owned()))?;

    tracing::info!(order_id = %order_id, product_id = %order.product_id, "Order saved");

    Ok(Json(OrderCreatedResponse {
        message: "Order Saved Successfully!".to_owned(),
        order_id,
    }))
}

/// List every order, newest first.
///
/// # Errors
///
/// Returns 500 if the query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_newest_first()
        .await?;
    Ok(Json(orders))
}

/// Rewrite an order's customer name, phone, address and payment method.
///
/// # Errors
///
/// Returns 404 if no order has this id, 400 if a required column would be
/// cleared, 500 if the update fails.
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<OrderId>,
    ApiJson(body): ApiJson<UpdateOrderRequest>,
) -> Result<Json<MessageResponse>> {
    OrderRepository::new(state.pool())
        .update_customer_details(id, &body.into())
        .await
        .map_err(not_found)?;

    tracing::info!(order_id = %id, "Order updated");
    Ok(Json(MessageResponse::new(format!(
        "Order ID {id} updated successfully."
    ))))
}

/// Delete an order.
///
/// # Errors
///
/// Returns 404 if no order has this id, 500 if the delete fails.
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<OrderId>,
) -> Result<Json<MessageResponse>> {
    OrderRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(not_found)?;

    tracing::info!(order_id = %id, "Order deleted");
    Ok(Json(MessageResponse::new(format!(
        "Order ID {id} deleted successfully."
    ))))
}
