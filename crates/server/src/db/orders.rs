//! Order repository.

use sqlx::PgPool;

use shopdesk_core::OrderId;

use super::{RepositoryError, WriteOutcome};
use crate::models::{CustomerDetails, NewOrder, Order};

/// Repository for `customer_order` rows.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order with its product snapshot.
    ///
    /// `created_at` is assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Constraint` if `product_id` names no product.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, order: &NewOrder) -> Result<WriteOutcome, RepositoryError> {
        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO customer_order
                (product_id, user_name, phone, product_name, product_url,
                 description, price, address, payment_method)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            ",
        )
        .bind(order.product_id)
        .bind(&order.user_name)
        .bind(&order.phone)
        .bind(&order.product_name)
        .bind(&order.product_url)
        .bind(&order.description)
        .bind(order.price)
        .bind(&order.address)
        .bind(&order.payment_method)
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(WriteOutcome::inserted(id))
    }

    /// List every order, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_newest_first(&self) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            r"
            SELECT id, product_id, user_name, phone, product_name, product_url,
                   description, price, address, payment_method, created_at
            FROM customer_order
            ORDER BY id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Rewrite the customer and shipping fields of an order.
    ///
    /// Product and price columns are not part of the statement.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this id.
    /// Returns `RepositoryError::Constraint` if a required column is cleared.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_customer_details(
        &self,
        id: OrderId,
        details: &CustomerDetails,
    ) -> Result<WriteOutcome, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE customer_order
            SET user_name = $1, phone = $2, address = $3, payment_method = $4
            WHERE id = $5
            ",
        )
        .bind(&details.user_name)
        .bind(&details.phone)
        .bind(&details.address)
        .bind(&details.payment_method)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        WriteOutcome::affected(result.rows_affected()).require_match()
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: OrderId) -> Result<WriteOutcome, RepositoryError> {
        let result = sqlx::query("DELETE FROM customer_order WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        WriteOutcome::affected(result.rows_affected()).require_match()
    }
}
