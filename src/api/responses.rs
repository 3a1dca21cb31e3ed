use serde::{Deserialize, Serialize};

use crate::manager::{HostCapacity, ResourceSpec, UsedResources, Vm};

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub(crate) struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub(crate) const fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub(crate) fn err(msg: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(msg.into()) }
    }
}

/// Request body for POST /api/vms.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateVmRequest {
    /// Display name; defaulted from the assigned id when empty or absent.
    pub name: Option<String>,
    pub cpu: u32,
    pub ram: u32,
    pub disk: u32,
}

/// Request body for POST /api/vms/{vm_id}/resize.
#[derive(Debug, Deserialize)]
pub(crate) struct ResizeRequest {
    pub cpu: u32,
    pub ram: u32,
    pub disk: u32,
}

impl ResizeRequest {
    pub(crate) const fn resources(&self) -> ResourceSpec {
        ResourceSpec { cpu: self.cpu, ram: self.ram, disk: self.disk }
    }
}

/// Response for commands that may be recognized as no-ops.
#[derive(Debug, Serialize)]
pub(crate) struct CommandResponse {
    pub vm: Vm,
    /// False when the request was a recognized no-op (nothing to apply).
    pub changed: bool,
}

/// Daemon summary returned by the status endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct StatusResponse {
    pub version: String,
    pub uptime_seconds: i64,
    pub vm_count: usize,
    pub capacity: HostCapacity,
    pub usage: UsedResources,
}

/// Pool snapshot with remaining headroom.
#[derive(Debug, Serialize)]
pub(crate) struct UsageResponse {
    pub capacity: HostCapacity,
    pub used: UsedResources,
    pub available: ResourceSpec,
}
