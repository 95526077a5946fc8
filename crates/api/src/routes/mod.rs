pub mod admin;
pub mod auth;
pub mod health;
pub mod projects;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                           login (public)
/// /auth/register                        self-registration (public, config-gated)
/// /auth/change-password                 change own password (auth)
/// /auth/me                              current principal (auth)
///
/// /users                                directory (auth)
/// /users/me                             get, update own profile
/// /users/me/reports                     direct reports (manager, admin)
/// /users/{id}                           get; update (self or admin)
///
/// /projects                             list with ?status&search (auth)
/// /projects/{id}                        get (auth)
///
/// /admin/users                          list with ?role&isActive&search, create
/// /admin/users/{id}                     get, update
/// /admin/users/{id}/status              enable / disable
/// /admin/users/{id}/reset-password      set a new password
/// /admin/projects                       list, create
/// /admin/projects/{id}                  get, update
/// ```
///
/// `{id}` accepts an opaque id or the entity's human-readable code.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/projects", projects::router())
        .nest("/admin", admin::router())
}
