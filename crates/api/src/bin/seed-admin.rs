//! Bootstrap the first administrator account.
//!
//! Reads `SEED_ADMIN_EMAIL` and `SEED_ADMIN_PASSWORD` (plus optional
//! `SEED_ADMIN_FIRST_NAME` / `SEED_ADMIN_LAST_NAME`) and creates an ADMIN user
//! through the same validation and code allocation as the HTTP API. Does
//! nothing when an admin already exists.

use std::process::ExitCode;

use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workforce_api::services::users::create_user;
use workforce_core::validation::validate_create_user;
use workforce_db::repositories::UserRepo;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed_admin=info,workforce_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let email = std::env::var("SEED_ADMIN_EMAIL").expect("SEED_ADMIN_EMAIL must be set");
    let password = std::env::var("SEED_ADMIN_PASSWORD").expect("SEED_ADMIN_PASSWORD must be set");
    let first_name = std::env::var("SEED_ADMIN_FIRST_NAME").unwrap_or_else(|_| "System".into());
    let last_name =
        std::env::var("SEED_ADMIN_LAST_NAME").unwrap_or_else(|_| "Administrator".into());

    let pool = workforce_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    workforce_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    match UserRepo::admin_exists(&pool).await {
        Ok(true) => {
            tracing::info!("An admin account already exists, nothing to do");
            return ExitCode::SUCCESS;
        }
        Ok(false) => {}
        Err(e) => {
            tracing::error!(error = %e, "Failed to check for existing admin");
            return ExitCode::FAILURE;
        }
    }

    let body = json!({
        "firstName": first_name,
        "lastName": last_name,
        "email": email,
        "password": password,
        "role": "ADMIN",
    });
    let Some(body) = body.as_object() else {
        return ExitCode::FAILURE;
    };

    let input = match validate_create_user(body) {
        Ok(input) => input,
        Err(e) => {
            tracing::error!(error = %e, "Seed admin settings are invalid");
            return ExitCode::FAILURE;
        }
    };

    match create_user(&pool, input).await {
        Ok(user) => {
            tracing::info!(
                user_id = %user.id,
                employee_code = %user.employee_code,
                email = %user.email,
                "Admin account created"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create admin account");
            ExitCode::FAILURE
        }
    }
}
