//! Domain types and rules for the workforce directory.
//!
//! Everything here is pure: no database, no HTTP. The `db` and `api` crates
//! build on these types.

pub mod codes;
pub mod error;
pub mod identifier;
pub mod ids;
pub mod past_projects;
pub mod roles;
pub mod status;
pub mod types;
pub mod validation;
