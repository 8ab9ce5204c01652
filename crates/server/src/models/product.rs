//! Catalog entry model.

use serde::{Deserialize, Serialize};
use shopdesk_core::{Price, ProductId};

/// A catalog row as stored in `product`.
///
/// The capitalized JSON names match what the admin dashboard sends and
/// expects back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "Product_name")]
    #[sqlx(rename = "product_name")]
    pub name: Option<String>,
    #[serde(rename = "Price")]
    pub price: Option<Price>,
    #[serde(rename = "Image")]
    pub image: Option<String>,
    #[serde(rename = "Category")]
    pub category: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
}

/// The five writable catalog fields.
///
/// Used as-is for updates, which replace every field; a field left out of
/// the request body is written as `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFields {
    #[serde(rename = "Product_name", default)]
    pub name: Option<String>,
    #[serde(rename = "Price", default)]
    pub price: Option<Price>,
    #[serde(rename = "Image", default)]
    pub image: Option<String>,
    #[serde(rename = "Category", default)]
    pub category: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
}
