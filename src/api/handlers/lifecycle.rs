use crate::manager::VmId;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub(crate) async fn start_vm(
    State(state): State<Arc<AppState>>,
    Path(vm_id): Path<VmId>,
) -> impl IntoResponse {
    let result = state.manager.write().await.start_vm(vm_id);
    super::respond(&state, result)
}

pub(crate) async fn pause_vm(
    State(state): State<Arc<AppState>>,
    Path(vm_id): Path<VmId>,
) -> impl IntoResponse {
    let result = state.manager.write().await.pause_vm(vm_id);
    super::respond(&state, result)
}

pub(crate) async fn resume_vm(
    State(state): State<Arc<AppState>>,
    Path(vm_id): Path<VmId>,
) -> impl IntoResponse {
    let result = state.manager.write().await.resume_vm(vm_id);
    super::respond(&state, result)
}

pub(crate) async fn suspend_vm(
    State(state): State<Arc<AppState>>,
    Path(vm_id): Path<VmId>,
) -> impl IntoResponse {
    let result = state.manager.write().await.suspend_vm(vm_id);
    super::respond(&state, result)
}
