use thiserror::Error;

use super::vm::{ResourceSpec, VmId, VmStatus};

/// Typed failures surfaced by VM operations.
///
/// Every operation either fully succeeds or fails with one of these; there
/// is never partial state to clean up, and nothing here is fatal — the
/// caller decides whether to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    /// The request does not fit in the remaining host capacity.
    #[error("insufficient resources: requested {requested}, available {available}")]
    InsufficientResources { requested: ResourceSpec, available: ResourceSpec },

    /// The id does not refer to a live VM.
    #[error("VM {0} not found")]
    VmNotFound(VmId),

    /// The requested event is not legal for the VM's current status.
    #[error("cannot {event} VM {vm_id} while it is {status}")]
    InvalidTransition { vm_id: VmId, status: VmStatus, event: &'static str },
}
