//! Handlers for the availability admin screens.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use shopkit_core::grid::{GridBuilder, GridParams, GridView};
use shopkit_core::types::DbId;
use shopkit_db::facade::{AvailabilityFacade, FacadeError};
use shopkit_db::models::availability::Availability;
use shopkit_db::repositories::availability_repo::{AvailabilityOrder, SortDirection};

use crate::confirm_delete::{ConfirmDeleteDialog, ConfirmDeleteDialogFactory};
use crate::error::{AppError, AppResult};
use crate::flash::{redirect_with_flash, Flash};
use crate::middleware::csrf::{csrf_token, CsrfProtected};
use crate::routes::availability::{delete_path, list_path, DELETE_ROUTE};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Message sources
// ---------------------------------------------------------------------------
// Translated at render time; `%name%`-style placeholders are filled by the
// translator.

const MSG_NOT_FOUND: &str = "The selected availability does not exist.";
const MSG_REPLACEMENT_NOT_FOUND: &str = "The selected replacement availability does not exist.";
const MSG_DELETED: &str = "Availability \"%name%\" has been deleted.";
const MSG_REPLACED_AND_DELETED: &str =
    "Availability \"%old_name%\" has been replaced by \"%new_name%\" and deleted.";
const MSG_CONFIRM_DEFAULT: &str = "Availability \"%name%\" is set as the default availability \
     for in-stock goods. To remove it you must choose the availability to use everywhere it is \
     currently set. Which availability should be used instead?";
const MSG_CONFIRM_USED: &str = "Availability \"%name%\" is still used for some products. You \
     must choose which availability those products should use instead. Which availability do \
     you want to set for them?";
const MSG_CONFIRM_PLAIN: &str =
    "Do you really want to permanently remove availability \"%name%\"? It is not used anywhere.";
const MSG_CHOOSE_DEFAULT: &str = "Please choose the default availability for in-stock goods.";
const MSG_DEFAULT_UPDATED: &str =
    "The default availability for in-stock goods has been updated.";

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// Query parameters selecting the list ordering.
#[derive(Debug, Default, Deserialize)]
pub struct OrderParams {
    #[serde(default)]
    pub order_by: AvailabilityOrder,
    #[serde(default)]
    pub direction: SortDirection,
}

/// GET /admin/product/availability/list/
///
/// Returns the availability grid. Ordering is done in SQL; paging is applied
/// to the fetched rows.
pub async fn list(
    State(state): State<AppState>,
    Query(order): Query<OrderParams>,
    Query(grid_params): Query<GridParams>,
) -> AppResult<Json<GridView<Availability>>> {
    let rows = AvailabilityFacade::get_all(&state.pool, order.order_by, order.direction).await?;
    let view = availability_grid(&order).assemble(rows, &grid_params)?;
    Ok(Json(view))
}

fn availability_grid(order: &OrderParams) -> GridBuilder {
    GridBuilder::new()
        .column("name", "Name", true)
        .column("actions", "Actions", false)
        .ordered(order.order_by.as_str(), order.direction.as_str())
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// Query parameter naming the replacement availability, if any.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    pub new_id: Option<DbId>,
}

/// POST /admin/product/availability/delete/{id}?new_id=
///
/// Deletes an availability; with `new_id`, everything still pointing at it
/// (products, the default-in-stock setting) is repointed first, in the same
/// transaction. Lookup failures are user mistakes, not server faults, so
/// they come back as error notices on the redirect rather than error
/// statuses.
pub async fn delete(
    _csrf: CsrfProtected,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<DeleteParams>,
) -> AppResult<Response> {
    match AvailabilityFacade::delete_by_id(&state.pool, id, params.new_id).await {
        Ok(outcome) => {
            let message = match &outcome.replaced_by_name {
                Some(new_name) => state.translator.translate(
                    MSG_REPLACED_AND_DELETED,
                    &[("old_name", &outcome.deleted_name), ("new_name", new_name)],
                ),
                None => state
                    .translator
                    .translate(MSG_DELETED, &[("name", &outcome.deleted_name)]),
            };
            tracing::info!(id, new_id = ?params.new_id, "Availability deleted");
            Ok(redirect_with_flash(list_path(), vec![Flash::success(message)]))
        }
        Err(FacadeError::NotFound { .. }) => {
            let message = state.translator.translate(MSG_NOT_FOUND, &[]);
            Ok(redirect_with_flash(list_path(), vec![Flash::error(message)]))
        }
        Err(FacadeError::ReplacementNotFound { .. }) => {
            let message = state.translator.translate(MSG_REPLACEMENT_NOT_FOUND, &[]);
            Ok(redirect_with_flash(list_path(), vec![Flash::error(message)]))
        }
        Err(err) => Err(err.into()),
    }
}

// ---------------------------------------------------------------------------
// Delete confirmation
// ---------------------------------------------------------------------------

/// GET /admin/product/availability/delete_confirm/{id}
///
/// Returns the dialog the frontend shows before deleting. If the record is
/// the default for in-stock goods or still used by products, the dialog
/// forces choosing a replacement; the default-status message wins when both
/// apply.
pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let Some(availability) = AvailabilityFacade::get_by_id(&state.pool, id).await? else {
        let message = state.translator.translate(MSG_NOT_FOUND, &[]);
        return Ok((StatusCode::NOT_FOUND, message).into_response());
    };

    let is_default = AvailabilityFacade::is_default(&state.pool, id).await?;
    let is_used = AvailabilityFacade::is_used(&state.pool, id).await?;

    let dialog = if is_default || is_used {
        replacement_dialog(&state, &availability, is_default).await?
    } else {
        let message = state
            .translator
            .translate(MSG_CONFIRM_PLAIN, &[("name", &availability.name)]);
        ConfirmDeleteDialogFactory::simple_confirm(
            message,
            DELETE_ROUTE,
            delete_path(id),
            id,
            csrf_token(&state.config.csrf_secret),
        )
    };

    Ok(Json(dialog).into_response())
}

async fn replacement_dialog(
    state: &AppState,
    availability: &Availability,
    is_default: bool,
) -> Result<ConfirmDeleteDialog, AppError> {
    let source = if is_default {
        MSG_CONFIRM_DEFAULT
    } else {
        MSG_CONFIRM_USED
    };
    let message = state
        .translator
        .translate(source, &[("name", &availability.name)]);

    let candidates: BTreeMap<DbId, String> =
        AvailabilityFacade::get_all_except(&state.pool, availability.id)
            .await?
            .into_iter()
            .map(|candidate| (candidate.id, candidate.name))
            .collect();

    Ok(ConfirmDeleteDialogFactory::with_replacement_choice(
        message,
        DELETE_ROUTE,
        delete_path(availability.id),
        availability.id,
        candidates,
        csrf_token(&state.config.csrf_secret),
    ))
}

// ---------------------------------------------------------------------------
// Default-availability setting
// ---------------------------------------------------------------------------

/// View model for the default-availability setting form.
#[derive(Debug, Serialize)]
pub struct SettingFormView {
    /// Options the select is populated with, ordered by name.
    pub availabilities: Vec<Availability>,
    pub data: SettingFormData,
    /// Translated validation messages; empty on a clean render.
    pub errors: Vec<String>,
    /// Anti-forgery token the frontend must send with the submit.
    pub csrf_token: String,
}

/// Current form values.
#[derive(Debug, Serialize)]
pub struct SettingFormData {
    pub default_in_stock_availability: Option<DbId>,
}

/// Submitted form body.
#[derive(Debug, Deserialize)]
pub struct SettingForm {
    /// Raw selection. Validated here rather than by the extractor so a blank
    /// submission re-renders the form instead of failing extraction.
    #[serde(default)]
    pub default_in_stock_availability: Option<String>,
}

/// GET /admin/product/availability/setting/
pub async fn setting_show(State(state): State<AppState>) -> AppResult<Json<SettingFormView>> {
    let view = setting_form_view(&state, Vec::new()).await?;
    Ok(Json(view))
}

/// POST /admin/product/availability/setting/
///
/// Persists the default availability for in-stock goods. Invalid selections
/// re-render the form with a 422 and a translated message.
pub async fn setting_submit(
    _csrf: CsrfProtected,
    State(state): State<AppState>,
    Form(form): Form<SettingForm>,
) -> AppResult<Response> {
    let raw = form.default_in_stock_availability.unwrap_or_default();
    let Ok(id) = raw.trim().parse::<DbId>() else {
        return invalid_setting(&state, MSG_CHOOSE_DEFAULT).await;
    };

    match AvailabilityFacade::set_default_in_stock(&state.pool, id).await {
        Ok(()) => {
            tracing::info!(id, "Default in-stock availability updated");
            let message = state.translator.translate(MSG_DEFAULT_UPDATED, &[]);
            Ok(redirect_with_flash(list_path(), vec![Flash::success(message)]))
        }
        Err(FacadeError::NotFound { .. }) => invalid_setting(&state, MSG_NOT_FOUND).await,
        Err(err) => Err(err.into()),
    }
}

async fn setting_form_view(
    state: &AppState,
    errors: Vec<String>,
) -> Result<SettingFormView, AppError> {
    let availabilities =
        AvailabilityFacade::get_all(&state.pool, AvailabilityOrder::Name, SortDirection::Asc)
            .await?;
    let default = AvailabilityFacade::default_in_stock(&state.pool).await?;

    Ok(SettingFormView {
        availabilities,
        data: SettingFormData {
            default_in_stock_availability: default.map(|availability| availability.id),
        },
        errors,
        csrf_token: csrf_token(&state.config.csrf_secret),
    })
}

async fn invalid_setting(state: &AppState, source: &str) -> AppResult<Response> {
    let message = state.translator.translate(source, &[]);
    let view = setting_form_view(state, vec![message]).await?;
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response())
}
