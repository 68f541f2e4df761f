//! Domain model structs and DTOs.
//!
//! `availability` and `product` each pair a `FromRow` + `Serialize` entity
//! struct with a `Deserialize` create DTO. `setting` holds the well-known
//! setting names; the settings table itself is read as raw name/value pairs.

pub mod availability;
pub mod product;
pub mod setting;
