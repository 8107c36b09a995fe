//! Health check endpoint.

use axum::Json;
use serde::Serialize;

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness probe. Answers as long as the HTTP listener is up.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
