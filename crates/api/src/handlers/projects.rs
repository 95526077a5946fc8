//! Read-only project catalogue for every authenticated role.

use axum::extract::{Path, State};
use axum::Json;
use workforce_core::validation::{validate_list_projects_query, validate_no_query};

use crate::error::AppResult;
use crate::extract::QueryMap;
use crate::middleware::rbac::{cap, Require};
use crate::response::{ApiResponse, ProjectBody, ProjectsBody};
use crate::services::views::ProjectView;
use crate::services::{projects, resolver};
use crate::state::AppState;

/// GET /api/projects?status=&search=
pub async fn list_projects(
    State(state): State<AppState>,
    Require(_auth, _): Require<cap::ViewProjects>,
    QueryMap(query): QueryMap,
) -> AppResult<Json<ApiResponse<ProjectsBody>>> {
    let filter = validate_list_projects_query(&query)?;
    let list = projects::list_projects(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::projects(
        list.into_iter().map(ProjectView::from).collect(),
    )))
}

/// GET /api/projects/{id}
///
/// `id` is an opaque id or a project code.
pub async fn get_project(
    State(state): State<AppState>,
    Require(_auth, _): Require<cap::ViewProjects>,
    Path(id): Path<String>,
    QueryMap(query): QueryMap,
) -> AppResult<Json<ApiResponse<ProjectBody>>> {
    validate_no_query(&query, "GET /api/projects/:id")?;
    let project = resolver::resolve_project(&state.pool, &id, "id").await?;
    Ok(Json(ApiResponse::project(project.into())))
}
