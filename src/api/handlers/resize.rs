use crate::api::responses::{ApiResponse, CommandResponse, ResizeRequest};
use crate::manager::VmId;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

pub(crate) async fn resize_vm(
    State(state): State<Arc<AppState>>,
    Path(vm_id): Path<VmId>,
    Json(req): Json<ResizeRequest>,
) -> impl IntoResponse {
    if req.cpu == 0 || req.ram == 0 || req.disk == 0 {
        return Json(ApiResponse::<CommandResponse>::err(
            "cpu, ram, and disk must each be at least 1",
        ));
    }

    let result = state.manager.write().await.resize_vm(vm_id, req.resources());
    super::respond_outcome(&state, result)
}
