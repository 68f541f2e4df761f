//! Availability business rules.
//!
//! [`AvailabilityFacade`] is the single entry point the HTTP layer calls for
//! availability workflows. It owns the rules around the default in-stock
//! availability and runs every mutation in one transaction, so a failed step
//! rolls the whole operation back.

use shopkit_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::availability::Availability;
use crate::models::setting::DEFAULT_IN_STOCK_AVAILABILITY;
use crate::repositories::availability_repo::{AvailabilityOrder, SortDirection};
use crate::repositories::{AvailabilityRepo, ProductRepo, SettingRepo};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors surfaced by [`AvailabilityFacade`].
#[derive(Debug, thiserror::Error)]
pub enum FacadeError {
    /// No availability exists with the given id.
    #[error("Availability not found: {id}")]
    NotFound { id: DbId },

    /// The requested replacement availability does not exist.
    #[error("Replacement availability not found: {id}")]
    ReplacementNotFound { id: DbId },

    /// The operation's input failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The operation would break an invariant of the current state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An underlying database query failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// What a successful [`AvailabilityFacade::delete_by_id`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Name of the removed availability.
    pub deleted_name: String,
    /// Name of the replacement products were moved to, if one was given.
    pub replaced_by_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Facade
// ---------------------------------------------------------------------------

/// Business-rule boundary for availability workflows.
pub struct AvailabilityFacade;

impl AvailabilityFacade {
    /// Fetch one availability.
    pub async fn get_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Availability>, FacadeError> {
        Ok(AvailabilityRepo::find_by_id(pool, id).await?)
    }

    /// Fetch all availabilities in the requested order.
    pub async fn get_all(
        pool: &SqlitePool,
        order: AvailabilityOrder,
        direction: SortDirection,
    ) -> Result<Vec<Availability>, FacadeError> {
        Ok(AvailabilityRepo::list_all(pool, order, direction).await?)
    }

    /// Fetch all availabilities except the given one (replacement candidates).
    pub async fn get_all_except(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Vec<Availability>, FacadeError> {
        Ok(AvailabilityRepo::list_all_except(pool, id).await?)
    }

    /// Whether any product currently uses the availability.
    pub async fn is_used(pool: &SqlitePool, id: DbId) -> Result<bool, FacadeError> {
        Ok(ProductRepo::count_by_availability(pool, id).await? > 0)
    }

    /// Whether the availability is the configured in-stock default.
    pub async fn is_default(pool: &SqlitePool, id: DbId) -> Result<bool, FacadeError> {
        Ok(Self::default_in_stock_id(pool).await? == Some(id))
    }

    /// The configured default in-stock availability, if one is set.
    ///
    /// Returns `None` when the setting is absent or does not resolve to an
    /// existing row.
    pub async fn default_in_stock(
        pool: &SqlitePool,
    ) -> Result<Option<Availability>, FacadeError> {
        match Self::default_in_stock_id(pool).await? {
            Some(id) => Ok(AvailabilityRepo::find_by_id(pool, id).await?),
            None => Ok(None),
        }
    }

    /// Point the default in-stock setting at the given availability.
    ///
    /// Existence is checked inside the same transaction that writes the
    /// setting.
    pub async fn set_default_in_stock(pool: &SqlitePool, id: DbId) -> Result<(), FacadeError> {
        let mut tx = pool.begin().await?;

        AvailabilityRepo::find_by_id_in_tx(&mut tx, id)
            .await?
            .ok_or(FacadeError::NotFound { id })?;
        SettingRepo::set_in_tx(&mut tx, DEFAULT_IN_STOCK_AVAILABILITY, &id.to_string()).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Delete an availability, optionally moving its dependents to `new_id`.
    ///
    /// Runs as one transaction: target and replacement are resolved, all
    /// products referencing the target are reassigned, the default-in-stock
    /// setting is repointed when the target was the default, and the row is
    /// removed. Any early error rolls the whole operation back.
    ///
    /// Without a replacement, deleting the current default is refused with
    /// [`FacadeError::Conflict`]; deleting a product-referenced row trips
    /// the foreign key and surfaces as [`FacadeError::Database`].
    pub async fn delete_by_id(
        pool: &SqlitePool,
        id: DbId,
        new_id: Option<DbId>,
    ) -> Result<DeleteOutcome, FacadeError> {
        if new_id == Some(id) {
            return Err(FacadeError::Validation(
                "The replacement availability must be different from the one being deleted."
                    .to_string(),
            ));
        }

        let mut tx = pool.begin().await?;

        let target = AvailabilityRepo::find_by_id_in_tx(&mut tx, id)
            .await?
            .ok_or(FacadeError::NotFound { id })?;

        let replacement = match new_id {
            Some(new_id) => Some(
                AvailabilityRepo::find_by_id_in_tx(&mut tx, new_id)
                    .await?
                    .ok_or(FacadeError::ReplacementNotFound { id: new_id })?,
            ),
            None => None,
        };

        let default_id = SettingRepo::get_in_tx(&mut tx, DEFAULT_IN_STOCK_AVAILABILITY)
            .await?
            .and_then(|value| value.parse::<DbId>().ok());

        match &replacement {
            Some(replacement) => {
                ProductRepo::reassign_availability_in_tx(&mut tx, id, replacement.id).await?;
                if default_id == Some(id) {
                    SettingRepo::set_in_tx(
                        &mut tx,
                        DEFAULT_IN_STOCK_AVAILABILITY,
                        &replacement.id.to_string(),
                    )
                    .await?;
                }
            }
            None => {
                if default_id == Some(id) {
                    return Err(FacadeError::Conflict(
                        "The default in-stock availability cannot be deleted without \
                         choosing a replacement."
                            .to_string(),
                    ));
                }
            }
        }

        AvailabilityRepo::delete_in_tx(&mut tx, id).await?;
        tx.commit().await?;

        Ok(DeleteOutcome {
            deleted_name: target.name,
            replaced_by_name: replacement.map(|availability| availability.name),
        })
    }

    /// Raw id stored in the default-in-stock setting, if parseable.
    async fn default_in_stock_id(pool: &SqlitePool) -> Result<Option<DbId>, FacadeError> {
        Ok(SettingRepo::get(pool, DEFAULT_IN_STOCK_AVAILABILITY)
            .await?
            .and_then(|value| value.parse::<DbId>().ok()))
    }
}
