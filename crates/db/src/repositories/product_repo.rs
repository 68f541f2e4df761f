//! Repository for the `products` table.

use shopkit_core::types::DbId;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::models::product::{CreateProduct, Product};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, availability_id, created_at, updated_at";

/// Provides the product operations the availability workflows need.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (name, availability_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(input.availability_id)
            .fetch_one(pool)
            .await
    }

    /// Find a product by its internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count products currently assigned to the given availability.
    pub async fn count_by_availability(
        pool: &SqlitePool,
        availability_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM products WHERE availability_id = $1")
                .bind(availability_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Move every product from one availability to another inside an open
    /// transaction. Returns the number of rows updated.
    pub(crate) async fn reassign_availability_in_tx(
        tx: &mut Transaction<'_, Sqlite>,
        from: DbId,
        to: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products
             SET availability_id = $2, updated_at = datetime('now')
             WHERE availability_id = $1",
        )
        .bind(from)
        .bind(to)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }
}
