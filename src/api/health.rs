//! Health check endpoints for liveness and readiness checks

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use super::state::AppState;

/// Health response with optional storage check
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<HealthCheck>,
}

/// Health check status
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Result of checking a single dependency
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthCheck {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub latency_ms: u64,
}

/// Liveness: 200 whenever the process is serving
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is running", body = HealthResponse)),
    tags = ["health"]
)]
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness: 503 when the storage backend cannot be reached
#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "Storage reachable", body = HealthResponse),
        (status = 503, description = "Storage unreachable", body = HealthResponse)
    ),
    tags = ["health"]
)]
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let check = check_storage(&state).await;
    let status = check.status;

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: Some(check),
    };

    let status_code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

async fn check_storage(state: &AppState) -> HealthCheck {
    let start = Instant::now();

    match state.user_service.ping().await {
        Ok(()) => HealthCheck {
            status: HealthStatus::Healthy,
            message: None,
            latency_ms: start.elapsed().as_millis() as u64,
        },
        Err(e) => {
            warn!(error = %e, "Storage readiness check failed");
            HealthCheck {
                status: HealthStatus::Unhealthy,
                message: Some("storage unavailable".to_string()),
                latency_ms: start.elapsed().as_millis() as u64,
            }
        }
    }
}
