//! Dual-key entity resolution.
//!
//! Callers may reference users and projects by opaque id or by human-readable
//! code. Classification happens in `workforce_core::identifier`; this module
//! performs the matching lookup and turns a miss into `NotFound` naming the
//! field and value.

use sqlx::PgPool;
use workforce_core::error::CoreError;
use workforce_core::identifier::{EntityKind, Identifier};
use workforce_db::models::project::Project;
use workforce_db::models::user::User;
use workforce_db::repositories::{ProjectRepo, UserRepo};

use crate::error::AppResult;

fn not_found(kind: EntityKind, field: &str, id: &Identifier) -> CoreError {
    CoreError::not_found(kind.entity_name(), format!("{field} \"{id}\""))
}

/// Look up an already-classified user reference.
pub async fn find_user(pool: &PgPool, id: &Identifier, field: &str) -> AppResult<User> {
    let found = match id {
        Identifier::OpaqueId(oid) => UserRepo::find_by_id(pool, &oid.to_hex()).await?,
        Identifier::HumanCode(code) => UserRepo::find_by_code(pool, code).await?,
    };
    found.ok_or_else(|| not_found(EntityKind::User, field, id).into())
}

/// Look up an already-classified project reference.
pub async fn find_project(pool: &PgPool, id: &Identifier, field: &str) -> AppResult<Project> {
    let found = match id {
        Identifier::OpaqueId(oid) => ProjectRepo::find_by_id(pool, &oid.to_hex()).await?,
        Identifier::HumanCode(code) => ProjectRepo::find_by_code(pool, code).await?,
    };
    found.ok_or_else(|| not_found(EntityKind::Project, field, id).into())
}

/// Classify and look up a raw user identifier (path parameter).
///
/// Malformed input fails validation without touching the store.
pub async fn resolve_user(pool: &PgPool, raw: &str, field: &str) -> AppResult<User> {
    let id = Identifier::parse(raw, EntityKind::User, field)?;
    find_user(pool, &id, field).await
}

/// Classify and look up a raw project identifier (path parameter).
pub async fn resolve_project(pool: &PgPool, raw: &str, field: &str) -> AppResult<Project> {
    let id = Identifier::parse(raw, EntityKind::Project, field)?;
    find_project(pool, &id, field).await
}

/// Resolve a list of project references to canonical ids, in input order.
pub async fn resolve_project_ids(
    pool: &PgPool,
    ids: &[Identifier],
    field: &str,
) -> AppResult<Vec<String>> {
    let mut resolved = Vec::with_capacity(ids.len());
    for (i, id) in ids.iter().enumerate() {
        let project = find_project(pool, id, &format!("{field}[{i}]")).await?;
        resolved.push(project.id);
    }
    Ok(resolved)
}
