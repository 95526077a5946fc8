//! Validators for user payloads and the admin directory query.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::payload::{
    check_password_length, normalize_email, normalize_phone, reject_unknown_params, search_param,
    Patch, Payload,
};
use crate::error::{CoreError, CoreResult};
use crate::identifier::{EntityKind, Identifier};
use crate::roles::Role;
use crate::types::Date;

pub const PROFILE_FIELDS: &[&str] = &["firstName", "lastName", "email", "phone", "skills"];

pub const CREATE_USER_FIELDS: &[&str] = &[
    "firstName",
    "lastName",
    "email",
    "password",
    "phone",
    "role",
    "designation",
    "department",
    "manager",
    "currentProject",
    "skills",
    "dateOfJoining",
    "totalExperience",
    "location",
];

pub const ADMIN_UPDATE_FIELDS: &[&str] = &[
    "role",
    "designation",
    "department",
    "manager",
    "currentProject",
    "pastProjects",
    "dateOfJoining",
    "totalExperience",
    "location",
    "isActive",
];

pub const STATUS_FIELDS: &[&str] = &["isActive"];
pub const RESET_PASSWORD_FIELDS: &[&str] = &["newPassword"];
pub const USER_QUERY_PARAMS: &[&str] = &["role", "isActive", "search"];

const EXPERIENCE_MESSAGE: &str = "Total experience must be a non-negative number";

/// A fully validated admin-created user. References are still unresolved.
#[derive(Debug, Clone)]
pub struct NewUserInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub role: Role,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub manager: Option<Identifier>,
    pub current_project: Option<Identifier>,
    pub skills: Vec<String>,
    pub date_of_joining: Option<Date>,
    pub total_experience: Option<f64>,
    pub location: Option<String>,
}

/// Organizational fields an administrator may change.
#[derive(Debug, Clone, Default)]
pub struct AdminUserPatch {
    pub role: Option<Role>,
    pub designation: Patch<String>,
    pub department: Patch<String>,
    pub manager: Patch<Identifier>,
    pub current_project: Patch<Identifier>,
    /// Merged into the stored list, never replaces it.
    pub past_projects: Option<Vec<Identifier>>,
    pub date_of_joining: Patch<Date>,
    pub total_experience: Patch<f64>,
    pub location: Patch<String>,
    pub is_active: Option<bool>,
}

/// Fields a principal may change on their own record.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Patch<String>,
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserListQuery {
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

fn phone_patch(p: &Payload<'_>) -> CoreResult<Patch<String>> {
    match p.patch_str("phone")? {
        Patch::Set(raw) => Ok(match normalize_phone(&raw)? {
            Some(phone) => Patch::Set(phone),
            None => Patch::Clear,
        }),
        other => Ok(other),
    }
}

pub fn validate_create_user(body: &Map<String, Value>) -> CoreResult<NewUserInput> {
    let p = Payload::new(body);
    p.reject_unknown(CREATE_USER_FIELDS, "POST /api/admin/users")?;

    let first_name = p.required_str("firstName", "First name is required")?;
    let last_name = p.required_str("lastName", "Last name is required")?;
    let email = normalize_email(p.required_str("email", "Email is required")?)?;
    let password = p.required_secret("password", "Password is required")?;
    check_password_length(password, "Password")?;
    let role = p.optional_enum::<Role>("role")?.unwrap_or_default();
    let phone = phone_patch(&p)?.into_option();
    let manager = p
        .patch_reference("manager", EntityKind::User, "manager")?
        .into_option();
    let current_project = p
        .patch_reference("currentProject", EntityKind::Project, "currentProject")?
        .into_option();

    Ok(NewUserInput {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email,
        password: password.to_string(),
        phone,
        role,
        designation: p.patch_str("designation")?.into_option(),
        department: p.patch_str("department")?.into_option(),
        manager,
        current_project,
        skills: p.string_array("skills")?.unwrap_or_default(),
        date_of_joining: p.patch_date("dateOfJoining")?.into_option(),
        total_experience: p
            .patch_non_negative("totalExperience", EXPERIENCE_MESSAGE)?
            .into_option(),
        location: p.patch_str("location")?.into_option(),
    })
}

pub fn validate_update_user(body: &Map<String, Value>) -> CoreResult<AdminUserPatch> {
    let p = Payload::new(body);
    p.reject_unknown(ADMIN_UPDATE_FIELDS, "PATCH /api/admin/users/:id")?;

    Ok(AdminUserPatch {
        role: p.optional_enum("role")?,
        designation: p.patch_str("designation")?,
        department: p.patch_str("department")?,
        manager: p.patch_reference("manager", EntityKind::User, "manager")?,
        current_project: p.patch_reference(
            "currentProject",
            EntityKind::Project,
            "currentProject",
        )?,
        past_projects: p.reference_array("pastProjects", EntityKind::Project)?,
        date_of_joining: p.patch_date("dateOfJoining")?,
        total_experience: p.patch_non_negative("totalExperience", EXPERIENCE_MESSAGE)?,
        location: p.patch_str("location")?,
        is_active: p.optional_bool("isActive")?,
    })
}

pub fn validate_update_my_profile(body: &Map<String, Value>) -> CoreResult<ProfilePatch> {
    let p = Payload::new(body);
    p.reject_unknown(PROFILE_FIELDS, "PATCH /api/users/me")?;

    let first_name = p.patch_required_str("firstName", "First name cannot be empty")?;
    let last_name = p.patch_required_str("lastName", "Last name cannot be empty")?;
    let email = p
        .patch_required_str("email", "Email cannot be empty")?
        .map(normalize_email)
        .transpose()?;

    Ok(ProfilePatch {
        first_name: first_name.map(str::to_string),
        last_name: last_name.map(str::to_string),
        email,
        phone: phone_patch(&p)?,
        skills: if p.contains("skills") {
            Some(p.string_array("skills")?.ok_or_else(|| {
                CoreError::validation("skills must be an array")
            })?)
        } else {
            None
        },
    })
}

pub fn validate_update_status(body: &Map<String, Value>) -> CoreResult<bool> {
    let p = Payload::new(body);
    p.reject_unknown(STATUS_FIELDS, "PATCH /api/admin/users/:id/status")?;
    p.optional_bool("isActive")?
        .ok_or_else(|| CoreError::validation("isActive is required"))
}

pub fn validate_reset_password(body: &Map<String, Value>) -> CoreResult<String> {
    let p = Payload::new(body);
    p.reject_unknown(RESET_PASSWORD_FIELDS, "POST /api/admin/users/:id/reset-password")?;
    let password = p.required_secret("newPassword", "New password is required")?;
    check_password_length(password, "New password")?;
    Ok(password.to_string())
}

pub fn validate_list_users_query(query: &HashMap<String, String>) -> CoreResult<UserListQuery> {
    reject_unknown_params(query, USER_QUERY_PARAMS)?;

    let role = match query.get("role").map(|r| r.trim()) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<Role>()?),
    };
    let is_active = match query.get("isActive") {
        None => None,
        Some(raw) if raw.eq_ignore_ascii_case("true") => Some(true),
        Some(raw) if raw.eq_ignore_ascii_case("false") => Some(false),
        Some(_) => {
            return Err(CoreError::validation(
                "isActive must be a boolean value (true or false)",
            ))
        }
    };

    Ok(UserListQuery {
        role,
        is_active,
        search: search_param(query)?,
    })
}
