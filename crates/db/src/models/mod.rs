//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches, where applicable

pub mod conversation;
pub mod message;
pub mod refresh_token;
pub mod user;
