//! Handlers for the `/users` directory.

use axum::extract::{Path, State};
use axum::Json;
use workforce_core::error::CoreError;
use workforce_core::roles::Capability;
use workforce_core::validation::{
    validate_no_query, validate_update_my_profile, validate_update_user,
};

use crate::error::{AppError, AppResult};
use crate::extract::{JsonObject, QueryMap};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{cap, Require};
use crate::response::{ApiResponse, UserBody, UsersBody};
use crate::services::{resolver, users, views};
use crate::state::AppState;

/// GET /api/users
///
/// The whole directory, most recent first. Takes no query parameters.
pub async fn list_directory(
    State(state): State<AppState>,
    Require(_auth, _): Require<cap::ViewDirectory>,
    QueryMap(query): QueryMap,
) -> AppResult<Json<ApiResponse<UsersBody>>> {
    validate_no_query(&query, "GET /api/users")?;
    let list = users::list_directory(&state.pool).await?;
    Ok(Json(ApiResponse::users(views::user_views(&state.pool, list).await?)))
}

/// GET /api/users/me
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryMap(query): QueryMap,
) -> AppResult<Json<ApiResponse<UserBody>>> {
    validate_no_query(&query, "GET /api/users/me")?;
    Ok(Json(ApiResponse::user(
        views::user_view(&state.pool, auth.user).await?,
    )))
}

/// PATCH /api/users/me
///
/// Only profile fields; role, status and organizational fields are rejected.
pub async fn update_me(
    State(state): State<AppState>,
    Require(auth, _): Require<cap::EditOwnProfile>,
    JsonObject(body): JsonObject,
) -> AppResult<Json<ApiResponse<UserBody>>> {
    let patch = validate_update_my_profile(&body)?;
    let updated = users::update_profile(&state.pool, &auth.user, patch).await?;
    Ok(Json(
        ApiResponse::user(views::user_view(&state.pool, updated).await?)
            .with_message("Profile updated successfully"),
    ))
}

/// GET /api/users/me/reports
///
/// Users whose manager is the caller.
pub async fn my_reports(
    State(state): State<AppState>,
    Require(auth, _): Require<cap::ViewReports>,
    QueryMap(query): QueryMap,
) -> AppResult<Json<ApiResponse<UsersBody>>> {
    validate_no_query(&query, "GET /api/users/me/reports")?;
    let list = users::list_reports(&state.pool, &auth.user).await?;
    Ok(Json(ApiResponse::users(views::user_views(&state.pool, list).await?)))
}

/// GET /api/users/{id}
///
/// `id` is an opaque id or an employee code.
pub async fn get_user(
    State(state): State<AppState>,
    Require(_auth, _): Require<cap::ViewDirectory>,
    Path(id): Path<String>,
    QueryMap(query): QueryMap,
) -> AppResult<Json<ApiResponse<UserBody>>> {
    validate_no_query(&query, "GET /api/users/:id")?;
    let user = resolver::resolve_user(&state.pool, &id, "id").await?;
    Ok(Json(ApiResponse::user(views::user_view(&state.pool, user).await?)))
}

/// PATCH /api/users/{id}
///
/// A principal targeting their own record gets the profile field set; an
/// administrator targeting someone else gets the admin field set. Anyone
/// else is refused.
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> AppResult<Json<ApiResponse<UserBody>>> {
    let target = resolver::resolve_user(&state.pool, &id, "id").await?;

    let updated = if target.id == auth.user.id {
        let patch = validate_update_my_profile(&body)?;
        users::update_profile(&state.pool, &target, patch).await?
    } else if auth.role().allows(Capability::ManageUsers) {
        let patch = validate_update_user(&body)?;
        users::update_by_admin(&state.pool, &target, patch).await?
    } else {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only update your own profile".into(),
        )));
    };

    Ok(Json(
        ApiResponse::user(views::user_view(&state.pool, updated).await?)
            .with_message("User updated successfully"),
    ))
}
