//! Roles and the role → capability table.
//!
//! Role names match the CHECK constraint on `users.role`. Authorization is
//! expressed as capabilities; adding a role means extending the exhaustive
//! match in [`Role::allows`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_MANAGER: &str = "MANAGER";
pub const ROLE_EMPLOYEE: &str = "EMPLOYEE";

/// Every accepted role name, in display order.
pub const ROLE_NAMES: [&str; 3] = [ROLE_ADMIN, ROLE_MANAGER, ROLE_EMPLOYEE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Employee,
}

/// Actions gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Read the employee directory and individual profiles.
    ViewDirectory,
    /// Read the project catalogue.
    ViewProjects,
    /// Update one's own restricted profile fields.
    EditOwnProfile,
    /// List one's own direct reports.
    ViewReports,
    /// Create, update, enable/disable users and reset their passwords.
    ManageUsers,
    /// Create and update projects.
    ManageProjects,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Manager => ROLE_MANAGER,
            Role::Employee => ROLE_EMPLOYEE,
        }
    }

    /// Whether this role grants `capability`.
    pub fn allows(self, capability: Capability) -> bool {
        use Capability::*;
        match self {
            Role::Admin => true,
            Role::Manager => match capability {
                ViewDirectory | ViewProjects | EditOwnProfile | ViewReports => true,
                ManageUsers | ManageProjects => false,
            },
            Role::Employee => match capability {
                ViewDirectory | ViewProjects | EditOwnProfile => true,
                ViewReports | ManageUsers | ManageProjects => false,
            },
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_MANAGER => Ok(Role::Manager),
            ROLE_EMPLOYEE => Ok(Role::Employee),
            other => Err(CoreError::validation(format!(
                "Invalid role value: \"{other}\". Role must be one of: {}",
                ROLE_NAMES.join(", ")
            ))),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
