//! Catalog route handlers.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, put},
};
use serde::Serialize;

use shopdesk_core::ProductId;

use super::{MessageResponse, Required};
use crate::db::{ProductRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiPath};
use crate::models::{Product, ProductFields};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/{id}", put(update).delete(delete))
}

/// Response for a created catalog entry.
#[derive(Debug, Serialize)]
pub struct ProductCreatedResponse {
    pub message: String,
    pub id: ProductId,
}

fn not_found(err: RepositoryError) -> AppError {
    match err {
        RepositoryError::NotFound => AppError::NotFound("Product not found".to_owned()),
        other => other.into(),
    }
}

/// List every catalog entry.
///
/// # Errors
///
/// Returns 500 if the query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// Create a catalog entry. `Product_name` and `Price` are required.
///
/// # Errors
///
/// Returns 400 if a required field is missing, 500 if the insert fails.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(fields): ApiJson<ProductFields>,
) -> Result<Json<ProductCreatedResponse>> {
    let mut required = Required::default();
    required.text("Product_name", fields.name.clone());
    required.value("Price", fields.price);
    required.finish()?;

    let outcome = ProductRepository::new(state.pool()).create(&fields).await?;
    let id = outcome
        .insert_id
        .map(ProductId::new)
        .ok_or_else(|| AppError::Internal("insert returned no id".to_owned()))?;

    tracing::info!(product_id = %id, "Product created");

    Ok(Json(ProductCreatedResponse {
        message: "Product Added Successfully!".to_owned(),
        id,
    }))
}

/// Replace all five fields of a catalog entry.
///
/// # Errors
///
/// Returns 404 if no entry has this id, 500 if the update fails.
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
    ApiJson(fields): ApiJson<ProductFields>,
) -> Result<Json<MessageResponse>> {
    ProductRepository::new(state.pool())
        .replace(id, &fields)
        .await
        .map_err(not_found)?;

    tracing::info!(product_id = %id, "Product updated");
    Ok(Json(MessageResponse::new("Product Updated Successfully!")))
}

/// Delete a catalog entry.
///
/// # Errors
///
/// Returns 404 if no entry has this id, 500 if the delete fails.
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<Json<MessageResponse>> {
    ProductRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(not_found)?;

    tracing::info!(product_id = %id, "Product deleted");
    Ok(Json(MessageResponse::new("Product Deleted Successfully!")))
}
