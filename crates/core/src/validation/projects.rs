//! Validators for project payloads and project list queries.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::payload::{reject_unknown_params, search_param, Patch, Payload};
use crate::error::{CoreError, CoreResult};
use crate::status::ProjectStatus;
use crate::types::Date;

pub const PROJECT_FIELDS: &[&str] = &[
    "name",
    "description",
    "status",
    "startDate",
    "endDate",
    "clientName",
];

pub const PROJECT_QUERY_PARAMS: &[&str] = &["status", "search"];

#[derive(Debug, Clone)]
pub struct NewProjectInput {
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub client_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    /// A rename never regenerates the project code.
    pub name: Option<String>,
    pub description: Patch<String>,
    pub status: Option<ProjectStatus>,
    pub start_date: Patch<Date>,
    pub end_date: Patch<Date>,
    pub client_name: Patch<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectListQuery {
    pub status: Option<ProjectStatus>,
    pub search: Option<String>,
}

fn check_date_order(start: &Patch<Date>, end: &Patch<Date>) -> CoreResult<()> {
    if let (Patch::Set(start), Patch::Set(end)) = (start, end) {
        if end < start {
            return Err(CoreError::validation("End date cannot be before start date"));
        }
    }
    Ok(())
}

pub fn validate_create_project(body: &Map<String, Value>) -> CoreResult<NewProjectInput> {
    let p = Payload::new(body);
    p.reject_unknown(PROJECT_FIELDS, "POST /api/admin/projects")?;

    let name = p.required_str("name", "Project name is required")?;
    let status = p.optional_enum::<ProjectStatus>("status")?.unwrap_or_default();
    let start_date = p.patch_date("startDate")?;
    let end_date = p.patch_date("endDate")?;
    check_date_order(&start_date, &end_date)?;

    Ok(NewProjectInput {
        name: name.to_string(),
        description: p.patch_str("description")?.into_option(),
        status,
        start_date: start_date.into_option(),
        end_date: end_date.into_option(),
        client_name: p.patch_str("clientName")?.into_option(),
    })
}

pub fn validate_update_project(body: &Map<String, Value>) -> CoreResult<ProjectPatch> {
    let p = Payload::new(body);
    p.reject_unknown(PROJECT_FIELDS, "PATCH /api/admin/projects/:id")?;

    let name = p.patch_required_str("name", "Project name cannot be empty")?;
    let status = p.optional_enum("status")?;
    let start_date = p.patch_date("startDate")?;
    let end_date = p.patch_date("endDate")?;
    check_date_order(&start_date, &end_date)?;

    Ok(ProjectPatch {
        name: name.map(str::to_string),
        description: p.patch_str("description")?,
        status,
        start_date,
        end_date,
        client_name: p.patch_str("clientName")?,
    })
}

pub fn validate_list_projects_query(
    query: &HashMap<String, String>,
) -> CoreResult<ProjectListQuery> {
    reject_unknown_params(query, PROJECT_QUERY_PARAMS)?;

    let status = match query.get("status").map(|s| s.trim()) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<ProjectStatus>()?),
    };

    Ok(ProjectListQuery {
        status,
        search: search_param(query)?,
    })
}
