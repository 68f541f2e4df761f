//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` (or an open transaction for multi-step
//! operations) as the first argument.

pub mod availability_repo;
pub mod product_repo;
pub mod setting_repo;

pub use availability_repo::AvailabilityRepo;
pub use product_repo::ProductRepo;
pub use setting_repo::SettingRepo;
