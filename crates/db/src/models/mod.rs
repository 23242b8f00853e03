//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus the `Deserialize` DTOs used by its write paths.

pub mod block;
pub mod business;
pub mod order;
pub mod schedule;
pub mod slot_lock;
