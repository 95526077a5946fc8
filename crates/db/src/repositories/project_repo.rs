//! Repository for the `projects` table.

use sqlx::PgPool;
use workforce_core::types::DbId;
use workforce_core::validation::ProjectListQuery;

use super::{contains_pattern, prefix_pattern};
use crate::models::project::{CreateProject, Project, ProjectSummary, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_code, name, description, status, start_date, end_date, \
                       client_name, created_at, updated_at";

const SUMMARY_COLUMNS: &str = "id, name, project_code";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (id, project_code, name, description, status, start_date,
                                   end_date, client_name)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.id)
            .bind(&input.project_code)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status.as_str())
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.client_name)
            .fetch_one(pool)
            .await
    }

    /// Find a project by opaque id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by code (`PROJ-XXX-NNN`).
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE project_code = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by exact name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE name = $1 LIMIT 1");
        sqlx::query_as::<_, Project>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Greatest project code starting with `prefix`, in byte order.
    pub async fn latest_code_with_prefix(
        pool: &PgPool,
        prefix: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar(
            r#"SELECT project_code FROM projects
               WHERE project_code LIKE $1
               ORDER BY project_code COLLATE "C" DESC
               LIMIT 1"#,
        )
        .bind(prefix_pattern(prefix))
        .fetch_optional(pool)
        .await
    }

    /// List projects matching `filter`, most recently created first.
    pub async fn list(
        pool: &PgPool,
        filter: &ProjectListQuery,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if filter.status.is_some() {
            conditions.push(format!("status = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!(
                "(name ILIKE ${bind_idx} OR project_code ILIKE ${bind_idx} \
                  OR client_name ILIKE ${bind_idx})"
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let query =
            format!("SELECT {COLUMNS} FROM projects {where_clause} ORDER BY created_at DESC");

        let mut q = sqlx::query_as::<_, Project>(&query);
        if let Some(status) = filter.status {
            q = q.bind(status.as_str());
        }
        if let Some(ref search) = filter.search {
            q = q.bind(contains_pattern(search));
        }
        q.fetch_all(pool).await
    }

    /// Reference summaries for the given ids. Missing ids are skipped.
    pub async fn find_summaries(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM projects WHERE id = ANY($1)");
        sqlx::query_as::<_, ProjectSummary>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Overwrite the mutable columns. Returns `None` if the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = $2,
                description = $3,
                status = $4,
                start_date = $5,
                end_date = $6,
                client_name = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status.as_str())
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.client_name)
            .fetch_optional(pool)
            .await
    }
}
