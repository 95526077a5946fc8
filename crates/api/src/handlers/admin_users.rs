//! Admin-only user management handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use workforce_core::validation::{
    validate_create_user, validate_list_users_query, validate_no_query, validate_reset_password,
    validate_update_status, validate_update_user,
};

use crate::error::AppResult;
use crate::extract::{JsonObject, QueryMap};
use crate::middleware::rbac::{cap, Require};
use crate::response::{ApiResponse, UserBody, UsersBody};
use crate::services::{resolver, users, views};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Listing and lookup
// ---------------------------------------------------------------------------

/// GET /api/admin/users?role=&isActive=&search=
pub async fn list_users(
    State(state): State<AppState>,
    Require(_admin, _): Require<cap::ManageUsers>,
    QueryMap(query): QueryMap,
) -> AppResult<Json<ApiResponse<UsersBody>>> {
    let filter = validate_list_users_query(&query)?;
    let list = users::list_users(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::users(views::user_views(&state.pool, list).await?)))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Require(_admin, _): Require<cap::ManageUsers>,
    Path(id): Path<String>,
    QueryMap(query): QueryMap,
) -> AppResult<Json<ApiResponse<UserBody>>> {
    validate_no_query(&query, "GET /api/admin/users/:id")?;
    let user = resolver::resolve_user(&state.pool, &id, "id").await?;
    Ok(Json(ApiResponse::user(views::user_view(&state.pool, user).await?)))
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// POST /api/admin/users
///
/// Creates the account with a generated employee code. The new user must
/// change the password at first login.
pub async fn create_user(
    State(state): State<AppState>,
    Require(admin, _): Require<cap::ManageUsers>,
    JsonObject(body): JsonObject,
) -> AppResult<(StatusCode, Json<ApiResponse<UserBody>>)> {
    let input = validate_create_user(&body)?;
    let user = users::create_user(&state.pool, input).await?;
    tracing::info!(admin_id = %admin.id(), user_id = %user.id, "Admin created user");

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::user(views::user_view(&state.pool, user).await?)
                .with_message("User created successfully"),
        ),
    ))
}

/// PATCH /api/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Require(_admin, _): Require<cap::ManageUsers>,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> AppResult<Json<ApiResponse<UserBody>>> {
    let patch = validate_update_user(&body)?;
    let target = resolver::resolve_user(&state.pool, &id, "id").await?;
    let updated = users::update_by_admin(&state.pool, &target, patch).await?;

    Ok(Json(
        ApiResponse::user(views::user_view(&state.pool, updated).await?)
            .with_message("User updated successfully"),
    ))
}

/// PATCH /api/admin/users/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Require(_admin, _): Require<cap::ManageUsers>,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> AppResult<Json<ApiResponse<UserBody>>> {
    let is_active = validate_update_status(&body)?;
    let target = resolver::resolve_user(&state.pool, &id, "id").await?;
    let updated = users::set_status(&state.pool, &target, is_active).await?;

    let verb = if is_active { "enabled" } else { "disabled" };
    Ok(Json(
        ApiResponse::user(views::user_view(&state.pool, updated).await?)
            .with_message(format!("User {verb} successfully")),
    ))
}

/// POST /api/admin/users/{id}/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Require(_admin, _): Require<cap::ManageUsers>,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> AppResult<Json<ApiResponse<()>>> {
    let new_password = validate_reset_password(&body)?;
    let target = resolver::resolve_user(&state.pool, &id, "id").await?;
    users::reset_password(&state.pool, &target, &new_password).await?;
    Ok(Json(ApiResponse::message("Password reset successfully")))
}
