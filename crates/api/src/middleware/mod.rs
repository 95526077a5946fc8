//! Access-control extractors.
//!
//! - [`auth::AuthUser`] -- Verifies the Bearer token and loads the active principal.
//! - [`rbac::Require`] -- Additionally requires a capability of the principal's role.

pub mod auth;
pub mod rbac;
