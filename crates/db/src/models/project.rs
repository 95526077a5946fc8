//! Project entity model and DTOs.

use sqlx::FromRow;
use workforce_core::status::ProjectStatus;
use workforce_core::types::{Date, DbId, Timestamp};

/// Full row from the `projects` table.
#[derive(Debug, Clone, FromRow)]
pub struct Project {
    pub id: DbId,
    pub project_code: String,
    pub name: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub client_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Reference shape embedded in user responses.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectSummary {
    pub id: DbId,
    pub name: String,
    pub project_code: String,
}

/// DTO for inserting a project. Id and code are allocated by the caller.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub id: DbId,
    pub project_code: String,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub client_name: Option<String>,
}

/// Every column an update may touch. `project_code` is never rewritten.
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub client_name: Option<String>,
}

impl From<&Project> for UpdateProject {
    fn from(p: &Project) -> Self {
        Self {
            name: p.name.clone(),
            description: p.description.clone(),
            status: p.status,
            start_date: p.start_date,
            end_date: p.end_date,
            client_name: p.client_name.clone(),
        }
    }
}
