//! Login, self-registration and password rotation.

use sqlx::PgPool;
use workforce_core::error::CoreError;
use workforce_core::roles::Role;
use workforce_core::validation::{ChangePasswordInput, LoginInput, NewUserInput, RegisterInput};
use workforce_db::models::user::User;
use workforce_db::repositories::UserRepo;

use super::users::{create_user, hash};
use crate::auth::jwt::{generate_token, JwtConfig};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};

fn check_password(password: &str, password_hash: &str) -> AppResult<bool> {
    verify_password(password, password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))
}

/// Issue a signed token for `user`.
pub fn issue_token(user: &User, jwt: &JwtConfig) -> AppResult<String> {
    generate_token(&user.id, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))
}

/// Authenticate by email and password.
///
/// Unknown email and wrong password are indistinguishable to the caller.
/// The disabled-account reason is only revealed once the password matched.
pub async fn login(pool: &PgPool, jwt: &JwtConfig, input: &LoginInput) -> AppResult<(String, User)> {
    let user = UserRepo::find_by_email(pool, &input.email)
        .await?
        .ok_or(AppError::Core(CoreError::InvalidCredentials))?;

    if !check_password(&input.password, &user.password_hash)? {
        tracing::info!(user_id = %user.id, "Login rejected: wrong password");
        return Err(CoreError::InvalidCredentials.into());
    }

    if !user.is_active {
        tracing::info!(user_id = %user.id, "Login rejected: account disabled");
        return Err(CoreError::AccountDisabled.into());
    }

    let token = issue_token(&user, jwt)?;
    tracing::info!(user_id = %user.id, "User logged in");
    Ok((token, user))
}

/// Public sign-up. Always creates an `EMPLOYEE`.
pub async fn register(pool: &PgPool, input: RegisterInput) -> AppResult<User> {
    create_user(
        pool,
        NewUserInput {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password: input.password,
            phone: input.phone,
            role: Role::Employee,
            designation: None,
            department: None,
            manager: None,
            current_project: None,
            skills: Vec::new(),
            date_of_joining: None,
            total_experience: None,
            location: None,
        },
    )
    .await
}

/// Rotate the caller's own password and clear the first-login flag.
pub async fn change_password(
    pool: &PgPool,
    user: &User,
    input: &ChangePasswordInput,
) -> AppResult<()> {
    if !check_password(&input.current_password, &user.password_hash)? {
        return Err(CoreError::Unauthorized("Current password is incorrect".into()).into());
    }
    if input.new_password == input.current_password {
        return Err(CoreError::validation(
            "New password must be different from the current password",
        )
        .into());
    }

    let password_hash = hash(&input.new_password)?;
    if !UserRepo::update_password(pool, &user.id, &password_hash, false).await? {
        return Err(CoreError::not_found("User", user.id.clone()).into());
    }
    tracing::info!(user_id = %user.id, "Password changed");
    Ok(())
}
