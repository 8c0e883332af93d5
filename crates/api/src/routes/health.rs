use axum::extract::State;
use axum::{routing::get, Json, Router};
use portfolio_core::types::Timestamp;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: Timestamp,
    pub db_healthy: bool,
}

/// Always 200 while the process is up; `db_healthy` reports the pool.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = portfolio_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Database did not answer the health check");
    }

    Json(HealthResponse {
        success: true,
        message: "Server is running",
        timestamp: chrono::Utc::now(),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
