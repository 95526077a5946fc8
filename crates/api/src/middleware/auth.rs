//! Bearer-token authentication extractor for Axum handlers.
//!
//! The gate walks `Unauthenticated -> TokenPresent -> TokenValid ->
//! PrincipalLoaded` and rejects at the first failed step. Handlers receive
//! the loaded principal as a value and pass it explicitly to services.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use workforce_core::error::CoreError;
use workforce_core::roles::Role;
use workforce_db::models::user::User;
use workforce_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated, active principal.
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %auth.user.id, role = %auth.role(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The principal as loaded for this request.
    pub user: User,
}

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.user.id
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "You are not logged in. Please log in to get access".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let user = UserRepo::find_by_id(&state.pool, &claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "The user belonging to this token no longer exists".into(),
                ))
            })?;

        if !user.is_active {
            return Err(AppError::Core(CoreError::AccountDisabled));
        }

        Ok(AuthUser { user })
    }
}
