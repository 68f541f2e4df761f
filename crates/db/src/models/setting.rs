//! Well-known application setting names.
//!
//! Settings are stored as name/value rows and read as raw strings; values
//! are parsed at the point of use.

/// Holds the id of the availability assigned to newly stocked products.
pub const DEFAULT_IN_STOCK_AVAILABILITY: &str = "default_in_stock_availability_id";
