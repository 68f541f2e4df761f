//! Availability (stock status) entity model and DTOs.

use serde::{Deserialize, Serialize};
use shopkit_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `availabilities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Availability {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new availability.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAvailability {
    pub name: String,
}
