//! Request handlers for the admin endpoints.
//!
//! Handlers stay thin: business rules live in `shopkit_db`'s availability
//! facade, and failures converge on [`AppError`](crate::error::AppError).

pub mod availability;
