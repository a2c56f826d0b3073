//! Health check endpoint (no authentication)

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::{db, AppState};

pub const API_VERSION: &str = "v1";
const HEALTHY: &str = "healthy";
const UNHEALTHY: &str = "unhealthy";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub api_version: String,
    pub module: String,
    pub version: String,
}

/// GET /health
///
/// Reports `healthy` with a reachable database, `unhealthy` otherwise. The
/// status code stays 200 either way so monitors can read the body. Ping
/// failures are logged, never echoed to the caller.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = match db::ping(&state.db).await {
        Ok(()) => HEALTHY,
        Err(e) => {
            warn!("Health check database ping failed: {}", e);
            UNHEALTHY
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        database: status.to_string(),
        api_version: API_VERSION.to_string(),
        module: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
