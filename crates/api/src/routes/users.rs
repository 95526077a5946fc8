//! Route definitions for the `/users` directory.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET   /             -> list_directory
/// GET   /me           -> get_me
/// PATCH /me           -> update_me
/// GET   /me/reports   -> my_reports
/// GET   /{id}         -> get_user
/// PATCH /{id}         -> update_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_directory))
        .route("/me", get(users::get_me).patch(users::update_me))
        .route("/me/reports", get(users::my_reports))
        .route("/{id}", get(users::get_user).patch(users::update_user))
}
