use axum::Json;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    status: &'static str,
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthStatus> {
    debug!("Health check requested");
    Json(HealthStatus { status: "ok" })
}
