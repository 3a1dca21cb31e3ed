use crate::manager::{LoadDirection, VmId};
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub(crate) async fn increase_load(
    State(state): State<Arc<AppState>>,
    Path(vm_id): Path<VmId>,
) -> impl IntoResponse {
    let result = state.manager.write().await.change_load(vm_id, LoadDirection::Increase);
    super::respond_outcome(&state, result)
}

pub(crate) async fn decrease_load(
    State(state): State<Arc<AppState>>,
    Path(vm_id): Path<VmId>,
) -> impl IntoResponse {
    let result = state.manager.write().await.change_load(vm_id, LoadDirection::Decrease);
    super::respond_outcome(&state, result)
}
