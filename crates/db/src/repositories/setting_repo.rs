//! Repository for the `settings` key/value table.

use sqlx::{Sqlite, SqlitePool, Transaction};

/// Provides typed access to application settings.
pub struct SettingRepo;

impl SettingRepo {
    /// Fetch a setting value by name.
    pub async fn get(pool: &SqlitePool, name: &str) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|(value,)| value))
    }

    /// Fetch a setting value by name inside an open transaction.
    pub(crate) async fn get_in_tx(
        tx: &mut Transaction<'_, Sqlite>,
        name: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(row.map(|(value,)| value))
    }

    /// Insert or overwrite a setting value inside an open transaction.
    pub(crate) async fn set_in_tx(
        tx: &mut Transaction<'_, Sqlite>,
        name: &str,
        value: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO settings (name, value, updated_at)
             VALUES ($1, $2, datetime('now'))
             ON CONFLICT (name) DO UPDATE
             SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(name)
        .bind(value)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
