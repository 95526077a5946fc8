//! Repository for the `users` table.

use sqlx::PgPool;
use workforce_core::roles::ROLE_ADMIN;
use workforce_core::types::DbId;
use workforce_core::validation::UserListQuery;

use super::{contains_pattern, prefix_pattern};
use crate::models::user::{CreateUser, UpdateProfile, UpdateUser, User, UserSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, employee_code, first_name, last_name, email, phone, password_hash, \
                       role, designation, department, manager_id, current_project_id, \
                       past_project_ids, skills, date_of_joining, total_experience, location, \
                       is_active, is_first_login, created_at, updated_at";

const SUMMARY_COLUMNS: &str = "id, first_name, last_name, email, employee_code";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// Fails with a unique violation on `uq_users_email` or
    /// `uq_users_employee_code`; the caller distinguishes the two.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, employee_code, first_name, last_name, email, phone,
                                password_hash, role, designation, department, manager_id,
                                current_project_id, skills, date_of_joining, total_experience,
                                location)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.id)
            .bind(&input.employee_code)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.password_hash)
            .bind(input.role.as_str())
            .bind(&input.designation)
            .bind(&input.department)
            .bind(&input.manager_id)
            .bind(&input.current_project_id)
            .bind(&input.skills)
            .bind(input.date_of_joining)
            .bind(input.total_experience)
            .bind(&input.location)
            .fetch_one(pool)
            .await
    }

    /// Find a user by opaque id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by employee code (`EMP-YYYY-XXXX`).
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE employee_code = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email, case-insensitively.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Greatest employee code starting with `prefix`, in byte order.
    pub async fn latest_code_with_prefix(
        pool: &PgPool,
        prefix: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar(
            r#"SELECT employee_code FROM users
               WHERE employee_code LIKE $1
               ORDER BY employee_code COLLATE "C" DESC
               LIMIT 1"#,
        )
        .bind(prefix_pattern(prefix))
        .fetch_optional(pool)
        .await
    }

    /// List users matching `filter`, most recently created first.
    ///
    /// Equality filters are AND-ed; `search` matches first name, last name,
    /// email or employee code as a literal case-insensitive substring.
    pub async fn list(pool: &PgPool, filter: &UserListQuery) -> Result<Vec<User>, sqlx::Error> {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if filter.role.is_some() {
            conditions.push(format!("role = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.is_active.is_some() {
            conditions.push(format!("is_active = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!(
                "(first_name ILIKE ${bind_idx} OR last_name ILIKE ${bind_idx} \
                  OR email ILIKE ${bind_idx} OR employee_code ILIKE ${bind_idx})"
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let query = format!("SELECT {COLUMNS} FROM users {where_clause} ORDER BY created_at DESC");

        let mut q = sqlx::query_as::<_, User>(&query);
        if let Some(role) = filter.role {
            q = q.bind(role.as_str());
        }
        if let Some(is_active) = filter.is_active {
            q = q.bind(is_active);
        }
        if let Some(ref search) = filter.search {
            q = q.bind(contains_pattern(search));
        }
        q.fetch_all(pool).await
    }

    /// Users whose manager is `manager_id`, most recently created first.
    pub async fn list_reports(pool: &PgPool, manager_id: &str) -> Result<Vec<User>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM users WHERE manager_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&query)
            .bind(manager_id)
            .fetch_all(pool)
            .await
    }

    /// Reference summaries for the given ids. Missing ids are skipped.
    pub async fn find_summaries(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<UserSummary>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM users WHERE id = ANY($1)");
        sqlx::query_as::<_, UserSummary>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Apply a self-service profile change, writing only the columns present.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: &str,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut set_clauses: Vec<String> = Vec::new();
        let mut param_idx = 2u32; // $1 is the id

        for (column, present) in [
            ("first_name", input.first_name.is_some()),
            ("last_name", input.last_name.is_some()),
            ("email", input.email.is_some()),
            ("phone", input.phone.is_some()),
            ("skills", input.skills.is_some()),
        ] {
            if present {
                set_clauses.push(format!("{column} = ${param_idx}"));
                param_idx += 1;
            }
        }

        if set_clauses.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let query = format!(
            "UPDATE users SET {} WHERE id = $1 RETURNING {COLUMNS}",
            set_clauses.join(", ")
        );
        let mut q = sqlx::query_as::<_, User>(&query).bind(id);
        if let Some(ref v) = input.first_name {
            q = q.bind(v);
        }
        if let Some(ref v) = input.last_name {
            q = q.bind(v);
        }
        if let Some(ref v) = input.email {
            q = q.bind(v);
        }
        if let Some(ref v) = input.phone {
            q = q.bind(v);
        }
        if let Some(ref v) = input.skills {
            q = q.bind(v);
        }
        q.fetch_optional(pool).await
    }

    /// Apply an administrative change, writing only the columns present.
    ///
    /// Past-project ids are appended against the stored array inside the
    /// statement itself, so concurrent appends never drop each other's ids.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut set_clauses: Vec<String> = Vec::new();
        let mut param_idx = 2u32; // $1 is the id

        for (column, present) in [
            ("role", input.role.is_some()),
            ("designation", input.designation.is_some()),
            ("department", input.department.is_some()),
            ("manager_id", input.manager_id.is_some()),
            ("current_project_id", input.current_project_id.is_some()),
            ("date_of_joining", input.date_of_joining.is_some()),
            ("total_experience", input.total_experience.is_some()),
            ("location", input.location.is_some()),
            ("is_active", input.is_active.is_some()),
        ] {
            if present {
                set_clauses.push(format!("{column} = ${param_idx}"));
                param_idx += 1;
            }
        }
        if !input.add_past_project_ids.is_empty() {
            set_clauses.push(format!(
                "past_project_ids = past_project_ids || ARRAY(
                    SELECT t.p FROM unnest(${param_idx}::text[]) WITH ORDINALITY AS t(p, ord)
                    WHERE t.p <> ALL(users.past_project_ids)
                    ORDER BY t.ord)"
            ));
        }

        if set_clauses.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let query = format!(
            "UPDATE users SET {} WHERE id = $1 RETURNING {COLUMNS}",
            set_clauses.join(", ")
        );
        let mut q = sqlx::query_as::<_, User>(&query).bind(id);
        if let Some(role) = input.role {
            q = q.bind(role.as_str());
        }
        if let Some(ref v) = input.designation {
            q = q.bind(v);
        }
        if let Some(ref v) = input.department {
            q = q.bind(v);
        }
        if let Some(ref v) = input.manager_id {
            q = q.bind(v);
        }
        if let Some(ref v) = input.current_project_id {
            q = q.bind(v);
        }
        if let Some(v) = input.date_of_joining {
            q = q.bind(v);
        }
        if let Some(v) = input.total_experience {
            q = q.bind(v);
        }
        if let Some(ref v) = input.location {
            q = q.bind(v);
        }
        if let Some(v) = input.is_active {
            q = q.bind(v);
        }
        if !input.add_past_project_ids.is_empty() {
            q = q.bind(&input.add_past_project_ids);
        }
        q.fetch_optional(pool).await
    }

    /// Enable or disable a user. Returns `None` if the row does not exist.
    pub async fn set_active(
        pool: &PgPool,
        id: &str,
        is_active: bool,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("UPDATE users SET is_active = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(is_active)
            .fetch_optional(pool)
            .await
    }

    /// Replace a user's password hash and set the first-login flag.
    ///
    /// Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: &str,
        password_hash: &str,
        is_first_login: bool,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, is_first_login = $3 WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .bind(is_first_login)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether any administrator account exists.
    pub async fn admin_exists(pool: &PgPool) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE role = $1)")
            .bind(ROLE_ADMIN)
            .fetch_one(pool)
            .await
    }
}
