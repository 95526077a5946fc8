//! Human-readable code allocation.
//!
//! The next code is derived from the greatest existing code in its scope.
//! Two concurrent creations can derive the same code; the unique constraint
//! rejects the loser, which then re-derives and retries a bounded number of
//! times. Any other unique violation is returned to the caller unchanged.

use std::future::Future;

use chrono::Datelike;
use sqlx::PgPool;
use workforce_core::codes::CodeScope;
use workforce_core::error::CoreError;
use workforce_db::repositories::{ProjectRepo, UserRepo};

use crate::error::{unique_violation, AppError, AppResult};

/// Attempts before a code collision is reported as a conflict.
pub const MAX_CODE_ATTEMPTS: u32 = 3;

pub const EMPLOYEE_CODE_CONSTRAINT: &str = "uq_users_employee_code";
pub const PROJECT_CODE_CONSTRAINT: &str = "uq_projects_project_code";

/// Next free employee code for the current calendar year.
pub async fn next_employee_code(pool: &PgPool) -> AppResult<String> {
    let scope = CodeScope::employee(chrono::Utc::now().year());
    let latest = UserRepo::latest_code_with_prefix(pool, scope.prefix()).await?;
    Ok(scope.next(latest.as_deref())?)
}

/// Next free project code for a project with the given name.
///
/// Fails with `InvalidInput` for a blank name before any store access.
pub async fn next_project_code(pool: &PgPool, name: &str) -> AppResult<String> {
    let scope = CodeScope::project(name)?;
    let latest = ProjectRepo::latest_code_with_prefix(pool, scope.prefix()).await?;
    Ok(scope.next(latest.as_deref())?)
}

/// Run `attempt` with a freshly allocated code until it does not collide on
/// `constraint`.
///
/// `allocate` produces the code; `attempt` performs the insert with it.
pub async fn insert_with_code<T, A, AF, I, IF>(
    constraint: &str,
    mut allocate: A,
    mut attempt: I,
) -> AppResult<T>
where
    A: FnMut() -> AF,
    AF: Future<Output = AppResult<String>>,
    I: FnMut(String) -> IF,
    IF: Future<Output = Result<T, sqlx::Error>>,
{
    for n in 1..=MAX_CODE_ATTEMPTS {
        let code = allocate().await?;
        match attempt(code.clone()).await {
            Ok(row) => return Ok(row),
            Err(err) if unique_violation(&err) == Some(constraint) => {
                tracing::warn!(code = %code, attempt = n, "Code collision, retrying");
            }
            Err(err) => return Err(AppError::Database(err)),
        }
    }
    Err(AppError::Core(CoreError::Conflict(format!(
        "Could not allocate a unique code after {MAX_CODE_ATTEMPTS} attempts"
    ))))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let result: AppResult<String> = insert_with_code(
            EMPLOYEE_CODE_CONSTRAINT,
            || async { Ok("EMP-2025-0001".to_string()) },
            |code| async move { Ok(code) },
        )
        .await;
        assert_eq!(result.unwrap(), "EMP-2025-0001");
    }

    #[tokio::test]
    async fn test_non_unique_errors_propagate_immediately() {
        let calls = AtomicU32::new(0);
        let result: AppResult<()> = insert_with_code(
            EMPLOYEE_CODE_CONSTRAINT,
            || async { Ok("EMP-2025-0001".to_string()) },
            |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(sqlx::Error::PoolTimedOut) }
            },
        )
        .await;
        assert_matches!(result, Err(AppError::Database(sqlx::Error::PoolTimedOut)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_allocation_errors_stop_the_loop() {
        let result: AppResult<()> = insert_with_code(
            PROJECT_CODE_CONSTRAINT,
            || async { Err(AppError::Core(CoreError::Conflict("No codes left".into()))) },
            |_| async { Ok(()) },
        )
        .await;
        assert_matches!(result, Err(AppError::Core(CoreError::Conflict(_))));
    }
}
