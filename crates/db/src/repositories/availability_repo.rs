//! Repository for the `availabilities` table.

use serde::Deserialize;
use shopkit_core::types::DbId;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::models::availability::{Availability, CreateAvailability};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Sort key accepted by the availability list.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityOrder {
    Id,
    #[default]
    Name,
}

impl AvailabilityOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Provides CRUD operations for availabilities.
pub struct AvailabilityRepo;

impl AvailabilityRepo {
    /// Insert a new availability, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateAvailability,
    ) -> Result<Availability, sqlx::Error> {
        let query = format!(
            "INSERT INTO availabilities (name)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Availability>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find an availability by its internal ID.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Availability>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM availabilities WHERE id = $1");
        sqlx::query_as::<_, Availability>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all availabilities in the requested order.
    pub async fn list_all(
        pool: &SqlitePool,
        order: AvailabilityOrder,
        direction: SortDirection,
    ) -> Result<Vec<Availability>, sqlx::Error> {
        let order_clause = match order {
            AvailabilityOrder::Id => format!("id {}", direction.sql()),
            AvailabilityOrder::Name => format!("name {dir}, id {dir}", dir = direction.sql()),
        };
        let query = format!("SELECT {COLUMNS} FROM availabilities ORDER BY {order_clause}");
        sqlx::query_as::<_, Availability>(&query)
            .fetch_all(pool)
            .await
    }

    /// List all availabilities except the given one, ordered by name.
    ///
    /// Used to offer replacement candidates when deleting.
    pub async fn list_all_except(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Vec<Availability>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM availabilities
             WHERE id <> $1
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Availability>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
    }

    /// Find an availability by ID inside an open transaction.
    pub(crate) async fn find_by_id_in_tx(
        tx: &mut Transaction<'_, Sqlite>,
        id: DbId,
    ) -> Result<Option<Availability>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM availabilities WHERE id = $1");
        sqlx::query_as::<_, Availability>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Delete an availability inside an open transaction.
    ///
    /// Returns `true` if a row was removed. A foreign key violation
    /// (products still referencing the row) surfaces as a database error.
    pub(crate) async fn delete_in_tx(
        tx: &mut Transaction<'_, Sqlite>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM availabilities WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
