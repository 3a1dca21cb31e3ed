use serde::{Deserialize, Serialize};
use tracing::error;

use super::error::VmError;
use super::vm::ResourceSpec;

/// Total host capacity. Fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostCapacity {
    pub cpu: u32,
    pub ram: u32,
    pub disk: u32,
}

/// Resources currently reserved out of the pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UsedResources {
    pub cpu: u32,
    pub ram: u32,
    pub disk: u32,
}

/// Single source of truth for host capacity and current usage, and the sole
/// arbiter of admission. Only the manager mutates it, and only while holding
/// the manager's write lock, so every check-then-commit here is atomic.
#[derive(Debug)]
pub struct ResourcePool {
    capacity: HostCapacity,
    used: UsedResources,
}

impl ResourcePool {
    pub const fn new(capacity: HostCapacity) -> Self {
        Self { capacity, used: UsedResources { cpu: 0, ram: 0, disk: 0 } }
    }

    pub const fn capacity(&self) -> HostCapacity {
        self.capacity
    }

    /// Read-only copy of current usage, for reporting.
    pub const fn snapshot(&self) -> UsedResources {
        self.used
    }

    /// Resources still unreserved.
    pub const fn available(&self) -> ResourceSpec {
        ResourceSpec {
            cpu: self.capacity.cpu - self.used.cpu,
            ram: self.capacity.ram - self.used.ram,
            disk: self.capacity.disk - self.used.disk,
        }
    }

    /// True iff the request fits in the remaining capacity. Pure query, no
    /// side effect.
    pub fn can_admit(&self, request: ResourceSpec) -> bool {
        self.used.cpu + request.cpu <= self.capacity.cpu
            && self.used.ram + request.ram <= self.capacity.ram
            && self.used.disk + request.disk <= self.capacity.disk
    }

    /// Reserve `request` out of the pool, or fail without mutating anything.
    pub fn reserve(&mut self, request: ResourceSpec) -> Result<(), VmError> {
        if !self.can_admit(request) {
            return Err(VmError::InsufficientResources {
                requested: request,
                available: self.available(),
            });
        }
        self.used.cpu += request.cpu;
        self.used.ram += request.ram;
        self.used.disk += request.disk;
        Ok(())
    }

    /// Return `request` to the pool. Never fails; the caller guarantees it
    /// releases no more than it reserved. An underflow means the accounting
    /// is corrupt, so it is reported and clamped rather than wrapped.
    pub fn release(&mut self, request: ResourceSpec) {
        if request.cpu > self.used.cpu
            || request.ram > self.used.ram
            || request.disk > self.used.disk
        {
            error!(
                "resource release underflow: releasing {} with {}/{} cores, {}/{} GB RAM, \
                 {}/{} GB disk reserved",
                request,
                self.used.cpu,
                self.capacity.cpu,
                self.used.ram,
                self.capacity.ram,
                self.used.disk,
                self.capacity.disk,
            );
        }
        self.used.cpu = self.used.cpu.saturating_sub(request.cpu);
        self.used.ram = self.used.ram.saturating_sub(request.ram);
        self.used.disk = self.used.disk.saturating_sub(request.disk);
    }

    /// Swap the reservation `old` for `new` in one step, or fail without
    /// mutating anything.
    ///
    /// Admission is checked with `old` excluded from usage, so a request that
    /// only shrinks always passes, and a mixed grow-and-shrink request is
    /// judged as a single unit.
    pub fn resize(&mut self, old: ResourceSpec, new: ResourceSpec) -> Result<(), VmError> {
        let fits = |used: u32, old_r: u32, new_r: u32, cap: u32| {
            u64::from(used) + u64::from(new_r) <= u64::from(cap) + u64::from(old_r)
        };
        if !fits(self.used.cpu, old.cpu, new.cpu, self.capacity.cpu)
            || !fits(self.used.ram, old.ram, new.ram, self.capacity.ram)
            || !fits(self.used.disk, old.disk, new.disk, self.capacity.disk)
        {
            return Err(VmError::InsufficientResources {
                requested: new,
                available: ResourceSpec {
                    cpu: self.capacity.cpu - self.used.cpu.saturating_sub(old.cpu),
                    ram: self.capacity.ram - self.used.ram.saturating_sub(old.ram),
                    disk: self.capacity.disk - self.used.disk.saturating_sub(old.disk),
                },
            });
        }
        self.release(old);
        self.used.cpu += new.cpu;
        self.used.ram += new.ram;
        self.used.disk += new.disk;
        Ok(())
    }
}
