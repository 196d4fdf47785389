//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `Serialize` entity struct decoded from a store [`Row`](crate::Row)
//! - A `Deserialize` create DTO
//! - A `Deserialize` update DTO (all `Option` fields) for partial updates

pub mod project;
pub mod report;
