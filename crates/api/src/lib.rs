//! Workforce directory API server library.
//!
//! Exposes the building blocks (config, state, error handling, services,
//! routes) so integration tests, the server binary and the `seed-admin`
//! tool can all reach them.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
