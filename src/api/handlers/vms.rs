use crate::api::responses::{ApiResponse, CreateVmRequest};
use crate::manager::{ResourceSpec, Vm, VmId};
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

pub(crate) async fn create_vm(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateVmRequest>,
) -> impl IntoResponse {
    if req.cpu == 0 || req.ram == 0 || req.disk == 0 {
        return Json(ApiResponse::<Vm>::err("cpu, ram, and disk must each be at least 1"));
    }

    let request = ResourceSpec { cpu: req.cpu, ram: req.ram, disk: req.disk };
    let name = req.name.unwrap_or_default();

    let result = state.manager.write().await.create_vm(&name, request);
    super::respond(&state, result)
}

pub(crate) async fn list_vms(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let manager = state.manager.read().await;
    Json(ApiResponse::ok(manager.list_vms().to_vec()))
}

pub(crate) async fn get_vm(
    State(state): State<Arc<AppState>>,
    Path(vm_id): Path<VmId>,
) -> impl IntoResponse {
    let manager = state.manager.read().await;
    match manager.get_vm(vm_id) {
        Ok(vm) => Json(ApiResponse::ok(vm.clone())),
        Err(e) => Json(ApiResponse::<Vm>::err(format!("{e}"))),
    }
}

pub(crate) async fn destroy_vm(
    State(state): State<Arc<AppState>>,
    Path(vm_id): Path<VmId>,
) -> impl IntoResponse {
    let result = state.manager.write().await.destroy_vm(vm_id);
    super::respond(&state, result)
}
