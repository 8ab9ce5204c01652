//! Catalog repository.

use sqlx::PgPool;

use shopdesk_core::ProductId;

use super::{RepositoryError, WriteOutcome};
use crate::models::{Product, ProductFields};

/// Repository for `product` rows.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every catalog entry in key order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, product_name, price, image, category, description
            FROM product
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Insert a catalog entry and return its generated id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Constraint` if the row violates the schema.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, fields: &ProductFields) -> Result<WriteOutcome, RepositoryError> {
        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO product (product_name, price, image, category, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(&fields.name)
        .bind(fields.price)
        .bind(&fields.image)
        .bind(&fields.category)
        .bind(&fields.description)
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(WriteOutcome::inserted(id))
    }

    /// Replace all five fields of a catalog entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn replace(
        &self,
        id: ProductId,
        fields: &ProductFields,
    ) -> Result<WriteOutcome, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE product
            SET product_name = $1, price = $2, image = $3, category = $4, description = $5
            WHERE id = $6
            ",
        )
        .bind(&fields.name)
        .bind(fields.price)
        .bind(&fields.image)
        .bind(&fields.category)
        .bind(&fields.description)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        WriteOutcome::affected(result.rows_affected()).require_match()
    }

    /// Delete a catalog entry.
    ///
    /// Orders referencing it keep their snapshot; their `product_id` is
    /// cleared by the foreign key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId) -> Result<WriteOutcome, RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        WriteOutcome::affected(result.rows_affected()).require_match()
    }
}
