//! User entity model and DTOs.

use sqlx::FromRow;
use workforce_core::roles::Role;
use workforce_core::types::{Date, DbId, Timestamp};

/// Full row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub manager_id: Option<DbId>,
    pub current_project_id: Option<DbId>,
    pub past_project_ids: Vec<DbId>,
    pub skills: Vec<String>,
    pub date_of_joining: Option<Date>,
    pub total_experience: Option<f64>,
    pub location: Option<String>,
    pub is_active: bool,
    pub is_first_login: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Reference shape embedded for a user's manager.
#[derive(Debug, Clone, FromRow)]
pub struct UserSummary {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub employee_code: String,
}

/// DTO for inserting a user. Id, code and hash are prepared by the caller.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: DbId,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: Role,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub manager_id: Option<DbId>,
    pub current_project_id: Option<DbId>,
    pub skills: Vec<String>,
    pub date_of_joining: Option<Date>,
    pub total_experience: Option<f64>,
    pub location: Option<String>,
}

/// Columns a principal may change on their own record.
///
/// `None` leaves a column untouched; `Some(None)` clears a nullable one.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub skills: Option<Vec<String>>,
}

/// Organizational columns an administrator may change.
///
/// Same `None` / `Some(None)` convention as [`UpdateProfile`]. Past projects
/// are only ever appended to.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub role: Option<Role>,
    pub designation: Option<Option<String>>,
    pub department: Option<Option<String>>,
    pub manager_id: Option<Option<DbId>>,
    pub current_project_id: Option<Option<DbId>>,
    /// Appended in order, skipping ids the stored row already holds.
    pub add_past_project_ids: Vec<DbId>,
    pub date_of_joining: Option<Option<Date>>,
    pub total_experience: Option<Option<f64>>,
    pub location: Option<Option<String>>,
    pub is_active: Option<bool>,
}
