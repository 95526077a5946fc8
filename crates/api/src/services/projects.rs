//! Project catalogue management.

use sqlx::PgPool;
use workforce_core::error::CoreError;
use workforce_core::ids::ObjectId;
use workforce_core::validation::{NewProjectInput, ProjectListQuery, ProjectPatch};
use workforce_db::models::project::{CreateProject, Project, UpdateProject};
use workforce_db::repositories::ProjectRepo;

use super::apply;
use super::codes::{insert_with_code, next_project_code, PROJECT_CODE_CONSTRAINT};
use crate::error::AppResult;

/// Create a project. Names must be unique at creation time.
pub async fn create_project(pool: &PgPool, input: NewProjectInput) -> AppResult<Project> {
    if ProjectRepo::find_by_name(pool, &input.name).await?.is_some() {
        return Err(CoreError::Conflict("Project with this name already exists".into()).into());
    }

    let name = input.name.clone();
    let template = CreateProject {
        id: String::new(),
        project_code: String::new(),
        name: input.name,
        description: input.description,
        status: input.status,
        start_date: input.start_date,
        end_date: input.end_date,
        client_name: input.client_name,
    };

    let project = insert_with_code(
        PROJECT_CODE_CONSTRAINT,
        || next_project_code(pool, &name),
        |code| {
            let row = CreateProject {
                id: ObjectId::generate().to_hex(),
                project_code: code,
                ..template.clone()
            };
            async move { ProjectRepo::create(pool, &row).await }
        },
    )
    .await?;

    tracing::info!(
        project_id = %project.id,
        project_code = %project.project_code,
        "Project created",
    );
    Ok(project)
}

pub async fn list_projects(pool: &PgPool, filter: &ProjectListQuery) -> AppResult<Vec<Project>> {
    Ok(ProjectRepo::list(pool, filter).await?)
}

/// Apply changes to a project. Renaming keeps the existing code.
pub async fn update_project(
    pool: &PgPool,
    project: &Project,
    patch: ProjectPatch,
) -> AppResult<Project> {
    let mut changes = UpdateProject::from(project);
    let dates_changed = !patch.start_date.is_keep() || !patch.end_date.is_keep();

    if let Some(name) = patch.name {
        changes.name = name;
    }
    if let Some(status) = patch.status {
        changes.status = status;
    }
    apply(&mut changes.description, patch.description);
    apply(&mut changes.client_name, patch.client_name);
    apply(&mut changes.start_date, patch.start_date);
    apply(&mut changes.end_date, patch.end_date);

    // A patch may move only one end of the range; check the merged result.
    if let (true, Some(start), Some(end)) = (dates_changed, changes.start_date, changes.end_date) {
        if end < start {
            return Err(CoreError::validation("End date cannot be before start date").into());
        }
    }

    let updated = ProjectRepo::update(pool, &project.id, &changes)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", project.id.clone()))?;
    tracing::info!(project_id = %updated.id, "Project updated");
    Ok(updated)
}
