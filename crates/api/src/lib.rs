//! Admin API server for the shopkit catalog backend.
//!
//! Exposes the building blocks (config, state, error mapping, routes) so the
//! binary entrypoint and the integration tests can assemble the same app.

pub mod config;
pub mod confirm_delete;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
