mod lifecycle;
mod load;
mod resize;
mod settings;
mod sse;
mod status;
mod vms;

pub(super) use lifecycle::{pause_vm, resume_vm, start_vm, suspend_vm};
pub(super) use load::{decrease_load, increase_load};
pub(super) use resize::resize_vm;
pub(super) use settings::get_settings;
pub(super) use sse::sse_events;
pub(super) use status::{get_capacity, get_status, get_usage};
pub(super) use vms::{create_vm, destroy_vm, get_vm, list_vms};

use crate::api::responses::{ApiResponse, CommandResponse};
use crate::events::Event;
use crate::manager::{Outcome, Vm, VmError};
use crate::AppState;
use axum::Json;

/// Surface an admission refusal to event subscribers. Other failures are the
/// caller's own mistake and stay in the HTTP response.
fn publish_failure(state: &AppState, error: &VmError) {
    if matches!(error, VmError::InsufficientResources { .. }) {
        let _ = state
            .event_hub
            .publish(Event::ManagerError { message: format!("Resource allocation failed: {error}") });
    }
}

fn respond(state: &AppState, result: Result<Vm, VmError>) -> Json<ApiResponse<Vm>> {
    match result {
        Ok(vm) => Json(ApiResponse::ok(vm)),
        Err(e) => {
            publish_failure(state, &e);
            Json(ApiResponse::err(format!("{e}")))
        }
    }
}

fn respond_outcome(
    state: &AppState,
    result: Result<Outcome, VmError>,
) -> Json<ApiResponse<CommandResponse>> {
    match result {
        Ok(outcome) => {
            let changed = outcome.changed();
            Json(ApiResponse::ok(CommandResponse { changed, vm: outcome.into_vm() }))
        }
        Err(e) => {
            publish_failure(state, &e);
            Json(ApiResponse::err(format!("{e}")))
        }
    }
}
