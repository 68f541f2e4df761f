//! Persistence layer for the shopkit admin backend.
//!
//! Pool construction, embedded migrations, entity models, repositories, and
//! the availability facade. The store is SQLite; foreign keys are enforced
//! on every connection.

use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod facade;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

/// Embedded migrations, shared by the server binary and test harnesses.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create a connection pool from a database URL.
///
/// The database file is created on first use.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    SqlitePoolOptions::new()
        .max_connections(20)
        .connect_with(options)
        .await
}

/// Verify the database answers queries.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}
