//! Handlers for the `/auth` resource (login, registration, password, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use workforce_core::error::CoreError;
use workforce_core::validation::{
    validate_change_password, validate_login, validate_no_query, validate_register,
};

use crate::error::{AppError, AppResult};
use crate::extract::{JsonObject, QueryMap};
use crate::middleware::auth::AuthUser;
use crate::response::{ApiResponse, UserBody};
use crate::services::{auth as auth_service, views};
use crate::state::AppState;

/// POST /api/auth/login
///
/// Authenticate with email + password. Returns a bearer token and the user.
pub async fn login(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> AppResult<Json<ApiResponse<UserBody>>> {
    let input = validate_login(&body)?;
    let (token, user) = auth_service::login(&state.pool, &state.config.jwt, &input).await?;
    let view = views::user_view(&state.pool, user).await?;

    Ok(Json(
        ApiResponse::user(view)
            .with_message("Login successful")
            .with_token(token),
    ))
}

/// POST /api/auth/register
///
/// Public sign-up as an `EMPLOYEE`. Disabled unless `ALLOW_SELF_REGISTRATION`
/// is set.
pub async fn register(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> AppResult<(StatusCode, Json<ApiResponse<UserBody>>)> {
    if !state.config.allow_self_registration {
        return Err(AppError::Core(CoreError::Forbidden(
            "Self-registration is disabled".into(),
        )));
    }

    let input = validate_register(&body)?;
    let user = auth_service::register(&state.pool, input).await?;
    let token = auth_service::issue_token(&user, &state.config.jwt)?;
    let view = views::user_view(&state.pool, user).await?;

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::user(view)
                .with_message("User registered successfully")
                .with_token(token),
        ),
    ))
}

/// POST /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonObject(body): JsonObject,
) -> AppResult<Json<ApiResponse<()>>> {
    let input = validate_change_password(&body)?;
    auth_service::change_password(&state.pool, &auth.user, &input).await?;
    Ok(Json(ApiResponse::message("Password changed successfully")))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryMap(query): QueryMap,
) -> AppResult<Json<ApiResponse<UserBody>>> {
    validate_no_query(&query, "GET /api/auth/me")?;
    let view = views::user_view(&state.pool, auth.user).await?;
    Ok(Json(ApiResponse::user(view)))
}
