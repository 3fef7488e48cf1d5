//! Liveness endpoints

use axum::{extract::State, Json};
use predictcare_config::constants::service;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: String,
}

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: service::HEALTH_STATUS,
        message: state.settings.service.health_message.clone(),
    })
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Json<IndexResponse> {
    Json(IndexResponse {
        message: state.settings.service.greeting.clone(),
    })
}
