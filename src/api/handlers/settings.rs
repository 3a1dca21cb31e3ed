use crate::api::responses::ApiResponse;
use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

/// Read-only view of the daemon configuration. Host capacity is fixed at
/// startup, so there is no update counterpart.
pub(crate) async fn get_settings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.config.clone()))
}
