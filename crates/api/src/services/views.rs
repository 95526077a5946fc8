//! API response shapes.
//!
//! Users embed their manager, current project and past projects as small
//! reference objects. References are fetched in one query per kind for a
//! whole page of users.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::PgPool;
use workforce_core::roles::Role;
use workforce_core::status::ProjectStatus;
use workforce_core::types::{Date, DbId, Timestamp};
use workforce_db::models::project::{Project, ProjectSummary};
use workforce_db::models::user::{User, UserSummary};
use workforce_db::repositories::{ProjectRepo, UserRepo};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerRef {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub employee_id: String,
}

impl From<UserSummary> for ManagerRef {
    fn from(s: UserSummary) -> Self {
        Self {
            id: s.id,
            first_name: s.first_name,
            last_name: s.last_name,
            email: s.email,
            employee_id: s.employee_code,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRef {
    pub id: DbId,
    pub name: String,
    pub project_code: String,
}

impl From<ProjectSummary> for ProjectRef {
    fn from(s: ProjectSummary) -> Self {
        Self {
            id: s.id,
            name: s.name,
            project_code: s.project_code,
        }
    }
}

/// Public user representation (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: DbId,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub manager: Option<ManagerRef>,
    pub current_project: Option<ProjectRef>,
    pub past_projects: Vec<ProjectRef>,
    pub skills: Vec<String>,
    pub date_of_joining: Option<Date>,
    pub total_experience: Option<f64>,
    pub location: Option<String>,
    pub is_active: bool,
    pub is_first_login: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub id: DbId,
    pub project_code: String,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub client_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Project> for ProjectView {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            project_code: p.project_code,
            name: p.name,
            description: p.description,
            status: p.status,
            start_date: p.start_date,
            end_date: p.end_date,
            client_name: p.client_name,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

fn into_view(
    user: User,
    managers: &HashMap<DbId, ManagerRef>,
    projects: &HashMap<DbId, ProjectRef>,
) -> UserView {
    let full_name = user.full_name();
    let lookup = |id: &DbId| projects.get(id).cloned();
    UserView {
        manager: user.manager_id.as_ref().and_then(|id| managers.get(id).cloned()),
        current_project: user.current_project_id.as_ref().and_then(lookup),
        past_projects: user.past_project_ids.iter().filter_map(lookup).collect(),
        id: user.id,
        employee_id: user.employee_code,
        first_name: user.first_name,
        last_name: user.last_name,
        full_name,
        email: user.email,
        phone: user.phone,
        role: user.role,
        designation: user.designation,
        department: user.department,
        skills: user.skills,
        date_of_joining: user.date_of_joining,
        total_experience: user.total_experience,
        location: user.location,
        is_active: user.is_active,
        is_first_login: user.is_first_login,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

/// Build views for a page of users, resolving references in bulk.
pub async fn user_views(pool: &PgPool, users: Vec<User>) -> AppResult<Vec<UserView>> {
    let mut manager_ids: Vec<DbId> = users.iter().filter_map(|u| u.manager_id.clone()).collect();
    manager_ids.sort_unstable();
    manager_ids.dedup();

    let mut project_ids: Vec<DbId> = users
        .iter()
        .flat_map(|u| u.current_project_id.iter().chain(u.past_project_ids.iter()))
        .cloned()
        .collect();
    project_ids.sort_unstable();
    project_ids.dedup();

    let managers: HashMap<DbId, ManagerRef> = UserRepo::find_summaries(pool, &manager_ids)
        .await?
        .into_iter()
        .map(|s| (s.id.clone(), ManagerRef::from(s)))
        .collect();
    let projects: HashMap<DbId, ProjectRef> = ProjectRepo::find_summaries(pool, &project_ids)
        .await?
        .into_iter()
        .map(|s| (s.id.clone(), ProjectRef::from(s)))
        .collect();

    Ok(users
        .into_iter()
        .map(|u| into_view(u, &managers, &projects))
        .collect())
}

/// Build the view for a single user.
pub async fn user_view(pool: &PgPool, user: User) -> AppResult<UserView> {
    user_views(pool, vec![user])
        .await?
        .pop()
        .ok_or_else(|| AppError::InternalError("User view was not built".into()))
}
