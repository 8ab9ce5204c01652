//! Checkout orders.
//!
//! An order copies the product's name, image, description and price at the
//! moment of purchase. Those columns are written once by [`NewOrder`] and
//! never touched again; later catalog edits do not reach existing orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopdesk_core::{OrderId, Price, ProductId};

/// An order row as stored in `customer_order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub product_id: Option<ProductId>,
    pub user_name: String,
    pub phone: Option<String>,
    pub product_name: Option<String>,
    pub product_url: Option<String>,
    pub description: Option<String>,
    pub price: Price,
    pub address: String,
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated checkout, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub product_id: ProductId,
    pub user_name: String,
    pub phone: Option<String>,
    pub product_name: Option<String>,
    pub product_url: Option<String>,
    pub description: Option<String>,
    pub price: Price,
    pub address: String,
    pub payment_method: Option<String>,
}

/// The customer and shipping fields an order edit may rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDetails {
    pub user_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub payment_method: Option<String>,
}
