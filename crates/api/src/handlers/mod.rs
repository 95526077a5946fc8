//! HTTP handlers, grouped by resource.
//!
//! Handlers extract and validate, call into `services`, and wrap results in
//! the [`ApiResponse`](crate::response::ApiResponse) envelope.

pub mod admin_projects;
pub mod admin_users;
pub mod auth;
pub mod projects;
pub mod users;
