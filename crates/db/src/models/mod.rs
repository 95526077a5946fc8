//! Row structs and write DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO carrying every column the service decides on insert
//! - An update DTO carrying the full mutable column set
//! - A `FromRow` summary used when embedding references in responses

pub mod project;
pub mod user;
