//! Domain support for the shopkit admin backend.
//!
//! Pure logic with no database or HTTP dependencies: shared id/timestamp
//! types, the admin grid component, and message translation.

pub mod grid;
pub mod i18n;
pub mod types;
