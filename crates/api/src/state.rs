//! Shared application state for Axum handlers.

use std::sync::Arc;

use shopkit_core::i18n::Translator;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is an `Arc` internally and the rest is held
/// behind `Arc` here.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: shopkit_db::DbPool,
    /// Server configuration (timeouts, CORS, anti-forgery secret).
    pub config: Arc<ServerConfig>,
    /// Translator for user-facing notices.
    pub translator: Arc<Translator>,
}
