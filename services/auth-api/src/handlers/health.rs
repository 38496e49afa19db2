//! Health check handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use std::time::Instant;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub checks: ReadyChecks,
}

#[derive(Debug, Serialize)]
pub struct ReadyChecks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<CheckResult>,
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub status: &'static str,
    pub latency_ms: u64,
}

/// GET /health - Liveness probe (fast, no dependencies)
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "auth-api",
    })
}

/// GET /ready - Readiness probe (checks DB connectivity when a pool is attached)
pub async fn ready(State(state): State<AppState>) -> Result<Json<ReadyResponse>, StatusCode> {
    let database = match &state.pool {
        Some(pool) => {
            let start = Instant::now();
            let db_result = sqlx::query("SELECT 1").fetch_one(&**pool).await;
            let latency_ms = start.elapsed().as_millis() as u64;

            if let Err(e) = db_result {
                tracing::warn!(error = %e, latency_ms, "Database readiness check failed");
                // Return 503 if any check fails
                return Err(StatusCode::SERVICE_UNAVAILABLE);
            }

            Some(CheckResult {
                status: "ok",
                latency_ms,
            })
        }
        None => None,
    };

    Ok(Json(ReadyResponse {
        status: "ready",
        service: "auth-api",
        checks: ReadyChecks { database },
    }))
}
