//! Route definitions for the `/admin` namespace.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{admin_projects, admin_users};
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires the matching
/// management capability.
///
/// ```text
/// GET   /users                        -> list_users
/// POST  /users                        -> create_user
/// GET   /users/{id}                   -> get_user
/// PATCH /users/{id}                   -> update_user
/// PATCH /users/{id}/status            -> update_status
/// POST  /users/{id}/reset-password    -> reset_password
///
/// GET   /projects                     -> list_projects
/// POST  /projects                     -> create_project
/// GET   /projects/{id}                -> get_project
/// PATCH /projects/{id}                -> update_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(admin_users::list_users).post(admin_users::create_user),
        )
        .route(
            "/users/{id}",
            get(admin_users::get_user).patch(admin_users::update_user),
        )
        .route("/users/{id}/status", patch(admin_users::update_status))
        .route(
            "/users/{id}/reset-password",
            post(admin_users::reset_password),
        )
        .route(
            "/projects",
            get(admin_projects::list_projects).post(admin_projects::create_project),
        )
        .route(
            "/projects/{id}",
            get(admin_projects::get_project).patch(admin_projects::update_project),
        )
}
