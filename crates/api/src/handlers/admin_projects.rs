//! Admin-only project management handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use workforce_core::validation::{
    validate_create_project, validate_list_projects_query, validate_no_query,
    validate_update_project,
};

use crate::error::AppResult;
use crate::extract::{JsonObject, QueryMap};
use crate::middleware::rbac::{cap, Require};
use crate::response::{ApiResponse, ProjectBody, ProjectsBody};
use crate::services::views::ProjectView;
use crate::services::{projects, resolver};
use crate::state::AppState;

/// GET /api/admin/projects?status=&search=
pub async fn list_projects(
    State(state): State<AppState>,
    Require(_admin, _): Require<cap::ManageProjects>,
    QueryMap(query): QueryMap,
) -> AppResult<Json<ApiResponse<ProjectsBody>>> {
    let filter = validate_list_projects_query(&query)?;
    let list = projects::list_projects(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::projects(
        list.into_iter().map(ProjectView::from).collect(),
    )))
}

/// POST /api/admin/projects
///
/// The project code is derived from the name and never changes afterwards.
pub async fn create_project(
    State(state): State<AppState>,
    Require(_admin, _): Require<cap::ManageProjects>,
    JsonObject(body): JsonObject,
) -> AppResult<(StatusCode, Json<ApiResponse<ProjectBody>>)> {
    let input = validate_create_project(&body)?;
    let project = projects::create_project(&state.pool, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::project(project.into()).with_message("Project created successfully")),
    ))
}

/// GET /api/admin/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Require(_admin, _): Require<cap::ManageProjects>,
    Path(id): Path<String>,
    QueryMap(query): QueryMap,
) -> AppResult<Json<ApiResponse<ProjectBody>>> {
    validate_no_query(&query, "GET /api/admin/projects/:id")?;
    let project = resolver::resolve_project(&state.pool, &id, "id").await?;
    Ok(Json(ApiResponse::project(project.into())))
}

/// PATCH /api/admin/projects/{id}
pub async fn update_project(
    State(state): State<AppState>,
    Require(_admin, _): Require<cap::ManageProjects>,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> AppResult<Json<ApiResponse<ProjectBody>>> {
    let patch = validate_update_project(&body)?;
    let project = resolver::resolve_project(&state.pool, &id, "id").await?;
    let updated = projects::update_project(&state.pool, &project, patch).await?;

    Ok(Json(
        ApiResponse::project(updated.into()).with_message("Project updated successfully"),
    ))
}
