use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub role: String,
    pub version: String,
}

/// Liveness only; the completion API is not contacted
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        role: state.role.name().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
