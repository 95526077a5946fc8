//! Request validators.
//!
//! Each validator takes the raw JSON object (or query map) so unknown keys
//! and wrong JSON types are visible, checks fields in a fixed order and
//! returns the first violation. On success it yields a typed input struct
//! that the service layer consumes directly.

mod auth;
mod payload;
mod projects;
mod users;

pub use auth::{
    validate_change_password, validate_login, validate_register, ChangePasswordInput, LoginInput,
    RegisterInput,
};
pub use payload::{parse_date, validate_no_query, Patch, MIN_PASSWORD_LENGTH};
pub use projects::{
    validate_create_project, validate_list_projects_query, validate_update_project,
    NewProjectInput, ProjectListQuery, ProjectPatch,
};
pub use users::{
    validate_create_user, validate_list_users_query, validate_reset_password,
    validate_update_my_profile, validate_update_status, validate_update_user, AdminUserPatch,
    NewUserInput, ProfilePatch, UserListQuery,
};
