//! Route definitions.

pub mod availability;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the admin route tree, nested under `/admin` by the caller.
///
/// ```text
/// /product/availability/list/                 availability grid (GET)
/// /product/availability/delete/{id}           delete, ?new_id= (POST)
/// /product/availability/delete_confirm/{id}   confirmation dialog (GET)
/// /product/availability/setting/              default form (GET, POST)
/// ```
pub fn admin_routes() -> Router<AppState> {
    Router::new().nest("/product/availability", availability::router())
}
