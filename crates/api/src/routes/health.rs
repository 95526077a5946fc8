//! Liveness endpoint, mounted at the root rather than under `/api`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// `up` when a round-trip query succeeds, `down` otherwise.
    pub database: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// GET /health
///
/// 200 when the database answers, 503 otherwise.
async fn health_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthReport>>) {
    let db_up = match workforce_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    let report = HealthReport {
        version: env!("CARGO_PKG_VERSION"),
        database: if db_up { "up" } else { "down" },
        timestamp: chrono::Utc::now(),
    };
    let status = if db_up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let message = if db_up { "Service is healthy" } else { "Database unreachable" };

    (status, Json(ApiResponse::new(report).with_message(message)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
