mod error;
mod pool;
mod vm;

pub use error::VmError;
pub use pool::{HostCapacity, ResourcePool, UsedResources};
pub use vm::{ActualUsage, LoadDirection, LoadLevel, ResourceDelta, ResourceSpec, Vm, VmId, VmStatus};

use chrono::Utc;
use tracing::{info, warn};

use crate::events::{Event, EventHub};

/// Result of a command that may be recognized as a no-op instead of applied:
/// a resize to identical values, or a load step at a ladder boundary. A
/// no-op is a success, not a failure — nothing changed and nothing failed.
#[derive(Debug, Clone)]
pub enum Outcome {
    Applied(Vm),
    NoOp(Vm),
}

impl Outcome {
    pub const fn changed(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn into_vm(self) -> Vm {
        match self {
            Self::Applied(vm) | Self::NoOp(vm) => vm,
        }
    }
}

/// Owns the VM collection and the resource pool, and drives every lifecycle
/// transition. All commands go through here; the pool is never mutated from
/// anywhere else, which keeps the admission invariant in one place.
///
/// The manager is synchronous and expects to sit behind a single write lock.
/// Each command is one atomic check-then-commit unit: admission is verified
/// first, and only then are the pool and the VM record updated together.
#[derive(Debug)]
pub struct VmManager {
    pool: ResourcePool,
    /// Live VMs in creation order. Destroyed VMs are removed outright.
    vms: Vec<Vm>,
    next_id: VmId,
    events: EventHub,
}

impl VmManager {
    pub fn new(capacity: HostCapacity, events: EventHub) -> Self {
        Self { pool: ResourcePool::new(capacity), vms: Vec::new(), next_id: 1, events }
    }

    // ---- queries ----

    /// All live VMs, in creation order.
    pub fn list_vms(&self) -> &[Vm] {
        &self.vms
    }

    pub fn get_vm(&self, id: VmId) -> Result<&Vm, VmError> {
        self.vms.iter().find(|vm| vm.id == id).ok_or(VmError::VmNotFound(id))
    }

    pub fn capacity(&self) -> HostCapacity {
        self.pool.capacity()
    }

    pub fn usage(&self) -> UsedResources {
        self.pool.snapshot()
    }

    pub fn available(&self) -> ResourceSpec {
        self.pool.available()
    }

    // ---- commands ----

    /// Create a VM and boot it. Admission covers the full allocation; on
    /// success the VM goes straight from initializing to running with its
    /// workload at idle. On failure the VM is never instantiated.
    pub fn create_vm(&mut self, name: &str, request: ResourceSpec) -> Result<Vm, VmError> {
        let id = self.next_id;
        let name =
            if name.trim().is_empty() { format!("VM{id}") } else { name.trim().to_string() };

        if let Err(e) = self.pool.reserve(request) {
            warn!("Failed to create {}: not enough resources available", name);
            return Err(e);
        }
        self.next_id += 1;

        let vm = Vm {
            id,
            name,
            resources: request,
            status: VmStatus::Running,
            load: LoadLevel::Idle,
            actual_usage: ActualUsage::derive(request, LoadLevel::Idle),
        };
        self.vms.push(vm.clone());

        info!("Created {} with {}", vm.name, vm.resources);
        self.publish_state_change(
            &vm,
            VmStatus::Initializing,
            VmStatus::Running,
            ResourceDelta::gain(request),
        );
        Ok(vm)
    }

    /// Start a suspended VM, re-admitting its cpu and ram. Its disk stayed
    /// reserved across the suspension.
    pub fn start_vm(&mut self, id: VmId) -> Result<Vm, VmError> {
        let idx = self.index_of(id)?;
        let vm = &self.vms[idx];
        if vm.status != VmStatus::Suspended {
            return Err(VmError::InvalidTransition { vm_id: id, status: vm.status, event: "start" });
        }
        let request = ResourceSpec { cpu: vm.resources.cpu, ram: vm.resources.ram, disk: 0 };
        if let Err(e) = self.pool.reserve(request) {
            warn!("Failed to start {}: not enough resources available", self.vms[idx].name);
            return Err(e);
        }

        let vm = &mut self.vms[idx];
        vm.status = VmStatus::Running;
        let vm = vm.clone();

        info!("Started {}", vm.name);
        self.publish_state_change(
            &vm,
            VmStatus::Suspended,
            VmStatus::Running,
            ResourceDelta::gain(request),
        );
        Ok(vm)
    }

    /// Pause a running VM. Cpu and ram stay reserved.
    pub fn pause_vm(&mut self, id: VmId) -> Result<Vm, VmError> {
        let idx = self.index_of(id)?;
        let vm = &mut self.vms[idx];
        if vm.status != VmStatus::Running {
            return Err(VmError::InvalidTransition { vm_id: id, status: vm.status, event: "pause" });
        }
        vm.status = VmStatus::Paused;
        let vm = vm.clone();

        info!("Paused {}", vm.name);
        self.publish_state_change(&vm, VmStatus::Running, VmStatus::Paused, ResourceDelta::default());
        Ok(vm)
    }

    /// Resume a paused VM.
    pub fn resume_vm(&mut self, id: VmId) -> Result<Vm, VmError> {
        let idx = self.index_of(id)?;
        let vm = &mut self.vms[idx];
        if vm.status != VmStatus::Paused {
            return Err(VmError::InvalidTransition {
                vm_id: id,
                status: vm.status,
                event: "resume",
            });
        }
        vm.status = VmStatus::Running;
        let vm = vm.clone();

        info!("Resumed {}", vm.name);
        self.publish_state_change(&vm, VmStatus::Paused, VmStatus::Running, ResourceDelta::default());
        Ok(vm)
    }

    /// Suspend a running or paused VM to disk: cpu and ram go back to the
    /// pool, the disk reservation stays.
    pub fn suspend_vm(&mut self, id: VmId) -> Result<Vm, VmError> {
        let idx = self.index_of(id)?;
        let vm = &self.vms[idx];
        if !matches!(vm.status, VmStatus::Running | VmStatus::Paused) {
            return Err(VmError::InvalidTransition {
                vm_id: id,
                status: vm.status,
                event: "suspend",
            });
        }
        let previous = vm.status;
        let released = ResourceSpec { cpu: vm.resources.cpu, ram: vm.resources.ram, disk: 0 };
        self.pool.release(released);

        let vm = &mut self.vms[idx];
        vm.status = VmStatus::Suspended;
        let vm = vm.clone();

        info!("Suspended {} to disk", vm.name);
        self.publish_state_change(&vm, previous, VmStatus::Suspended, ResourceDelta::release(released));
        Ok(vm)
    }

    /// Destroy a VM from any state and reclaim whatever it holds. The record
    /// is removed; the id is never reused.
    pub fn destroy_vm(&mut self, id: VmId) -> Result<Vm, VmError> {
        let idx = self.index_of(id)?;
        let vm = self.vms.remove(idx);
        let held = vm.held_resources();
        self.pool.release(held);

        info!("Destroyed {}, resources reclaimed", vm.name);
        self.publish_state_change(&vm, vm.status, VmStatus::Destroyed, ResourceDelta::release(held));
        Ok(vm)
    }

    /// Change a VM's allocation in one atomic step. Growth on any resource
    /// is admission-checked with the old allocation excluded; a request that
    /// only shrinks always succeeds. Rejection leaves everything untouched,
    /// and a request for the current values is a recognized no-op.
    pub fn resize_vm(&mut self, id: VmId, new: ResourceSpec) -> Result<Outcome, VmError> {
        let idx = self.index_of(id)?;
        let vm = &self.vms[idx];
        if !matches!(vm.status, VmStatus::Running | VmStatus::Paused) {
            return Err(VmError::InvalidTransition {
                vm_id: id,
                status: vm.status,
                event: "resize",
            });
        }
        let old = vm.resources;
        if new == old {
            info!("No changes to apply for {}", vm.name);
            return Ok(Outcome::NoOp(vm.clone()));
        }
        if let Err(e) = self.pool.resize(old, new) {
            warn!("Failed to resize {}: not enough resources available", self.vms[idx].name);
            return Err(e);
        }

        let vm = &mut self.vms[idx];
        vm.resources = new;
        vm.refresh_usage();
        let vm = vm.clone();

        info!("Resized {} to {}", vm.name, vm.resources);
        self.publish_state_change(&vm, vm.status, vm.status, new.delta_from(old));
        Ok(Outcome::Applied(vm))
    }

    /// Step a running VM's workload simulation one level up or down the
    /// ladder. At the top or bottom the request is a recognized no-op.
    pub fn change_load(&mut self, id: VmId, direction: LoadDirection) -> Result<Outcome, VmError> {
        let idx = self.index_of(id)?;
        let vm = &self.vms[idx];
        if vm.status != VmStatus::Running {
            return Err(VmError::InvalidTransition {
                vm_id: id,
                status: vm.status,
                event: "change the load of",
            });
        }
        let next = match direction {
            LoadDirection::Increase => vm.load.step_up(),
            LoadDirection::Decrease => vm.load.step_down(),
        };
        let Some(new_load) = next else {
            return Ok(Outcome::NoOp(vm.clone()));
        };

        let vm = &mut self.vms[idx];
        let previous = vm.load;
        vm.load = new_load;
        vm.refresh_usage();
        let vm = vm.clone();

        info!("{} workload changed to {}", vm.name, new_load.as_str().to_uppercase());
        let _ = self.events.publish(Event::LoadChanged {
            vm_id: vm.id,
            vm_name: vm.name.clone(),
            previous_load: previous,
            new_load,
            actual_usage: vm.actual_usage,
            timestamp: Utc::now(),
        });
        Ok(Outcome::Applied(vm))
    }

    // ---- internals ----

    fn index_of(&self, id: VmId) -> Result<usize, VmError> {
        self.vms.iter().position(|vm| vm.id == id).ok_or(VmError::VmNotFound(id))
    }

    /// Publish fire-and-forget: having no subscribers is fine.
    fn publish_state_change(
        &self,
        vm: &Vm,
        previous: VmStatus,
        new: VmStatus,
        delta: ResourceDelta,
    ) {
        let _ = self.events.publish(Event::StateChanged {
            vm_id: vm.id,
            vm_name: vm.name.clone(),
            previous_status: previous,
            new_status: new,
            timestamp: Utc::now(),
            resource_delta: delta,
        });
    }
}
