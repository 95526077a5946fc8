//! Service layer: business rules between handlers and repositories.
//!
//! Per-resource submodules, each a set of free async functions taking the
//! pool first (mirroring the repositories) and the acting principal, when
//! relevant, as an explicit argument:
//! - `auth` - login, registration, password change
//! - `users` - directory, profile and admin user management
//! - `projects` - project catalogue management
//! - `codes` - human-readable code allocation with conflict retry
//! - `resolver` - id-or-code lookups
//! - `views` - response shapes with embedded references

pub mod auth;
pub mod codes;
pub mod projects;
pub mod resolver;
pub mod users;
pub mod views;

use workforce_core::validation::Patch;

/// Replace `field` when the patch carries a change.
pub(crate) fn apply<T>(field: &mut Option<T>, patch: Patch<T>) {
    if let Some(value) = patch.into_change() {
        *field = value;
    }
}
