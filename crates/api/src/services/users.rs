//! User management: creation, directory listings, profile and admin updates.

use sqlx::PgPool;
use workforce_core::error::CoreError;
use workforce_core::ids::ObjectId;
use workforce_core::past_projects::past_project_additions;
use workforce_core::validation::{AdminUserPatch, NewUserInput, Patch, ProfilePatch, UserListQuery};
use workforce_db::models::user::{CreateUser, UpdateProfile, UpdateUser, User};
use workforce_db::repositories::UserRepo;

use super::codes::{insert_with_code, next_employee_code, EMPLOYEE_CODE_CONSTRAINT};
use super::resolver::{find_project, find_user, resolve_project_ids};
use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

const DUPLICATE_EMAIL: &str = "User with this email already exists";

/// Hash a password, mapping hasher failures to an internal error.
pub(crate) fn hash(password: &str) -> AppResult<String> {
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

async fn ensure_email_free(pool: &PgPool, email: &str, owner: Option<&str>) -> AppResult<()> {
    if let Some(existing) = UserRepo::find_by_email(pool, email).await? {
        if owner != Some(existing.id.as_str()) {
            return Err(CoreError::Conflict(DUPLICATE_EMAIL.into()).into());
        }
    }
    Ok(())
}

/// Create a user with a freshly allocated employee code.
///
/// The account starts active and must rotate its password on first login.
pub async fn create_user(pool: &PgPool, input: NewUserInput) -> AppResult<User> {
    ensure_email_free(pool, &input.email, None).await?;

    let manager_id = match &input.manager {
        Some(id) => Some(find_user(pool, id, "manager").await?.id),
        None => None,
    };
    let current_project_id = match &input.current_project {
        Some(id) => Some(find_project(pool, id, "currentProject").await?.id),
        None => None,
    };

    let template = CreateUser {
        id: String::new(),
        employee_code: String::new(),
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        phone: input.phone,
        password_hash: hash(&input.password)?,
        role: input.role,
        designation: input.designation,
        department: input.department,
        manager_id,
        current_project_id,
        skills: input.skills,
        date_of_joining: input.date_of_joining,
        total_experience: input.total_experience,
        location: input.location,
    };

    let user = insert_with_code(
        EMPLOYEE_CODE_CONSTRAINT,
        || next_employee_code(pool),
        |code| {
            let row = CreateUser {
                id: ObjectId::generate().to_hex(),
                employee_code: code,
                ..template.clone()
            };
            async move { UserRepo::create(pool, &row).await }
        },
    )
    .await?;

    tracing::info!(
        user_id = %user.id,
        employee_id = %user.employee_code,
        role = %user.role,
        "User created",
    );
    Ok(user)
}

/// Every user, most recently created first.
pub async fn list_directory(pool: &PgPool) -> AppResult<Vec<User>> {
    Ok(UserRepo::list(pool, &UserListQuery::default()).await?)
}

/// Users matching the admin list filter.
pub async fn list_users(pool: &PgPool, filter: &UserListQuery) -> AppResult<Vec<User>> {
    Ok(UserRepo::list(pool, filter).await?)
}

/// Direct reports of `manager`.
pub async fn list_reports(pool: &PgPool, manager: &User) -> AppResult<Vec<User>> {
    Ok(UserRepo::list_reports(pool, &manager.id).await?)
}

fn not_found(user: &User) -> AppError {
    CoreError::not_found("User", user.id.clone()).into()
}

/// Apply a principal's changes to their own profile.
///
/// Only the self-service columns are written; anything else on the stored
/// row is left as it is, even if `user` is an older snapshot.
pub async fn update_profile(pool: &PgPool, user: &User, patch: ProfilePatch) -> AppResult<User> {
    let email = match patch.email {
        Some(email) if email != user.email => {
            ensure_email_free(pool, &email, Some(&user.id)).await?;
            Some(email)
        }
        _ => None,
    };
    let changes = UpdateProfile {
        first_name: patch.first_name,
        last_name: patch.last_name,
        email,
        phone: patch.phone.into_change(),
        skills: patch.skills,
    };

    let Some(updated) = UserRepo::update_profile(pool, &user.id, &changes).await? else {
        return Err(not_found(user));
    };
    tracing::info!(user_id = %updated.id, "Profile updated");
    Ok(updated)
}

/// Apply an administrator's organizational changes to `target`.
///
/// Past projects are appended to the stored history, never replaced.
pub async fn update_by_admin(
    pool: &PgPool,
    target: &User,
    patch: AdminUserPatch,
) -> AppResult<User> {
    let manager_id = match patch.manager {
        Patch::Keep => None,
        Patch::Clear => Some(None),
        Patch::Set(id) => {
            let manager = find_user(pool, &id, "manager").await?;
            if manager.id == target.id {
                return Err(CoreError::validation("A user cannot be their own manager").into());
            }
            Some(Some(manager.id))
        }
    };
    let current_project_id = match patch.current_project {
        Patch::Keep => None,
        Patch::Clear => Some(None),
        Patch::Set(id) => Some(Some(find_project(pool, &id, "currentProject").await?.id)),
    };
    let add_past_project_ids = match patch.past_projects {
        Some(refs) => {
            let incoming = resolve_project_ids(pool, &refs, "pastProjects").await?;
            past_project_additions(&target.past_project_ids, &incoming)
        }
        None => Vec::new(),
    };

    let changes = UpdateUser {
        role: patch.role,
        designation: patch.designation.into_change(),
        department: patch.department.into_change(),
        manager_id,
        current_project_id,
        add_past_project_ids,
        date_of_joining: patch.date_of_joining.into_change(),
        total_experience: patch.total_experience.into_change(),
        location: patch.location.into_change(),
        is_active: patch.is_active,
    };

    let Some(updated) = UserRepo::update(pool, &target.id, &changes).await? else {
        return Err(not_found(target));
    };
    tracing::info!(user_id = %updated.id, role = %updated.role, "User updated by admin");
    Ok(updated)
}

/// Enable or disable an account.
pub async fn set_status(pool: &PgPool, target: &User, is_active: bool) -> AppResult<User> {
    let updated = UserRepo::set_active(pool, &target.id, is_active)
        .await?
        .ok_or_else(|| not_found(target))?;
    tracing::info!(user_id = %updated.id, is_active, "User status changed");
    Ok(updated)
}

/// Set a new password chosen by an administrator.
///
/// The user must rotate it at next login.
pub async fn reset_password(pool: &PgPool, target: &User, new_password: &str) -> AppResult<()> {
    let password_hash = hash(new_password)?;
    if !UserRepo::update_password(pool, &target.id, &password_hash, true).await? {
        return Err(not_found(target));
    }
    tracing::info!(user_id = %target.id, "Password reset by admin");
    Ok(())
}
