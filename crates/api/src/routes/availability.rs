//! Routes for the availability admin screens.

use axum::routing::{get, post};
use axum::Router;
use shopkit_core::types::DbId;

use crate::handlers::availability;
use crate::state::AppState;

/// Route name the frontend resolves for the delete action; embedded in the
/// delete-confirmation dialog payload.
pub const DELETE_ROUTE: &str = "admin_availability_delete";

/// Path of the availability list, used as the redirect target after
/// mutations.
pub fn list_path() -> &'static str {
    "/admin/product/availability/list/"
}

/// Path of the delete action for the given id.
pub fn delete_path(id: DbId) -> String {
    format!("/admin/product/availability/delete/{id}")
}

/// Routes mounted under `/admin/product/availability`.
///
/// ```text
/// GET  /list/                  availability grid
/// POST /delete/{id}            delete, ?new_id= picks the replacement
/// GET  /delete_confirm/{id}    delete-confirmation dialog
/// GET  /setting/               default-availability form
/// POST /setting/               submit the form
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list/", get(availability::list))
        .route("/delete/{id}", post(availability::delete))
        .route("/delete_confirm/{id}", get(availability::delete_confirm))
        .route(
            "/setting/",
            get(availability::setting_show).post(availability::setting_submit),
        )
}
