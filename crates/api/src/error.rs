//! Application error types and HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use shopkit_core::grid::GridError;
use shopkit_db::facade::FacadeError;
use thiserror::Error;

/// Convenience alias used by handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Top-level application error.
///
/// Everything a handler can fail with converges here so that `?` works
/// uniformly and the HTTP mapping lives in one place.
#[derive(Debug, Error)]
pub enum AppError {
    /// Business-rule failure raised by the availability facade.
    #[error(transparent)]
    Facade(#[from] FacadeError),

    /// Grid assembly failure.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Request lacked a required capability, e.g. a valid anti-forgery
    /// token.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Facade(facade) => match facade {
                FacadeError::NotFound { id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("Availability with id {id} not found"),
                ),
                FacadeError::ReplacementNotFound { id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("Replacement availability with id {id} not found"),
                ),
                FacadeError::Validation(message) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message.clone())
                }
                FacadeError::Conflict(message) => {
                    (StatusCode::CONFLICT, "CONFLICT", message.clone())
                }
                FacadeError::Database(err) => classify_sqlx_error(err),
            },
            AppError::Grid(GridError::PaginationNotSupported { message, .. }) => (
                StatusCode::BAD_REQUEST,
                "PAGINATION_NOT_SUPPORTED",
                message.clone(),
            ),
            AppError::Forbidden(message) => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", message.clone())
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, Json(body)).into_response()
    }
}

/// Map a database error to an HTTP status without leaking internals.
///
/// Constraint violations are client errors (the request asked for something
/// the schema forbids); everything else is logged and sanitized to a 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => match db_err.kind() {
            sqlx::error::ErrorKind::UniqueViolation => (
                StatusCode::CONFLICT,
                "CONFLICT",
                "Duplicate value violates a unique constraint".to_string(),
            ),
            sqlx::error::ErrorKind::ForeignKeyViolation => (
                StatusCode::CONFLICT,
                "CONFLICT",
                "Operation violates a foreign key constraint".to_string(),
            ),
            _ => {
                tracing::error!(error = %db_err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        },
        other => {
            tracing::error!(error = %other, "Unexpected database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
