//! Product entity model and DTOs.
//!
//! Only the columns the availability workflows touch; the full catalog
//! schema lives elsewhere.

use serde::{Deserialize, Serialize};
use shopkit_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub availability_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub availability_id: DbId,
}
