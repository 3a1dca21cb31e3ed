mod handlers;
pub(crate) mod responses;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the complete API router.
pub(crate) fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        // Status
        .route("/api/status", get(handlers::get_status))
        .route("/api/capacity", get(handlers::get_capacity))
        .route("/api/usage", get(handlers::get_usage))
        // VMs
        .route("/api/vms", get(handlers::list_vms))
        .route("/api/vms", post(handlers::create_vm))
        .route("/api/vms/{vm_id}", get(handlers::get_vm))
        // Lifecycle
        .route("/api/vms/{vm_id}/start", post(handlers::start_vm))
        .route("/api/vms/{vm_id}/pause", post(handlers::pause_vm))
        .route("/api/vms/{vm_id}/resume", post(handlers::resume_vm))
        .route("/api/vms/{vm_id}/suspend", post(handlers::suspend_vm))
        .route("/api/vms/{vm_id}/destroy", post(handlers::destroy_vm))
        // Dynamic resources
        .route("/api/vms/{vm_id}/resize", post(handlers::resize_vm))
        // Load simulation
        .route("/api/vms/{vm_id}/load/increase", post(handlers::increase_load))
        .route("/api/vms/{vm_id}/load/decrease", post(handlers::decrease_load))
        // Settings
        .route("/api/settings", get(handlers::get_settings))
        // SSE events
        .route("/api/events", get(handlers::sse_events))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
