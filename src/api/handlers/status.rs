use crate::api::responses::{ApiResponse, StatusResponse, UsageResponse};
use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;

pub(crate) async fn get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let manager = state.manager.read().await;
    Json(ApiResponse::ok(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
        vm_count: manager.list_vms().len(),
        capacity: manager.capacity(),
        usage: manager.usage(),
    }))
}

pub(crate) async fn get_capacity(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let manager = state.manager.read().await;
    Json(ApiResponse::ok(manager.capacity()))
}

pub(crate) async fn get_usage(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let manager = state.manager.read().await;
    Json(ApiResponse::ok(UsageResponse {
        capacity: manager.capacity(),
        used: manager.usage(),
        available: manager.available(),
    }))
}
