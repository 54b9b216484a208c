//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct
//! matching the database row, an insert DTO, and conversions to and from
//! the canonical in-memory record shape.

pub mod server;
