use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique VM identifier. Monotonically assigned by the manager, never reused
/// while the daemon is running.
pub type VmId = u64;

/// An allocation of host resources: whole CPU cores, whole GB of RAM, whole
/// GB of disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSpec {
    pub cpu: u32,
    pub ram: u32,
    pub disk: u32,
}

impl fmt::Display for ResourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cores, {} GB RAM, {} GB disk", self.cpu, self.ram, self.disk)
    }
}

impl ResourceSpec {
    /// The signed change that takes `from` to `self`.
    pub(crate) fn delta_from(self, from: Self) -> ResourceDelta {
        ResourceDelta {
            cpu: i64::from(self.cpu) - i64::from(from.cpu),
            ram: i64::from(self.ram) - i64::from(from.ram),
            disk: i64::from(self.disk) - i64::from(from.disk),
        }
    }
}

/// Signed change in reserved resources, reported with each state change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResourceDelta {
    pub cpu: i64,
    pub ram: i64,
    pub disk: i64,
}

impl ResourceDelta {
    /// Delta for resources newly taken from the pool.
    pub(crate) fn gain(spec: ResourceSpec) -> Self {
        spec.delta_from(ResourceSpec::default())
    }

    /// Delta for resources returned to the pool.
    pub(crate) fn release(spec: ResourceSpec) -> Self {
        ResourceSpec::default().delta_from(spec)
    }
}

/// Lifecycle status of a VM, serialized to the API as a lowercase string.
///
/// `Destroyed` is terminal: it appears as the new status in state-change
/// events, but destroying a VM removes its record from the manager, so it is
/// never stored and nothing can transition out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VmStatus {
    Initializing,
    Running,
    Paused,
    Suspended,
    Destroyed,
}

impl VmStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Suspended => "suspended",
            Self::Destroyed => "destroyed",
        }
    }
}

impl fmt::Display for VmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Simulated workload level. The ladder is ordered; load changes step one
/// level at a time and clamp at the ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadLevel {
    Idle,
    Low,
    Medium,
    High,
    Max,
}

impl LoadLevel {
    /// The ordered ladder, lowest to highest.
    pub const LADDER: [Self; 5] = [Self::Idle, Self::Low, Self::Medium, Self::High, Self::Max];

    /// Fraction of its allocation a VM at this level actually consumes.
    pub const fn factor(self) -> f64 {
        match self {
            Self::Idle => 0.2,
            Self::Low => 0.4,
            Self::Medium => 0.7,
            Self::High => 0.9,
            Self::Max => 1.0,
        }
    }

    /// The next level up, or `None` at the top of the ladder.
    pub fn step_up(self) -> Option<Self> {
        let idx = Self::LADDER.iter().position(|&level| level == self)?;
        Self::LADDER.get(idx + 1).copied()
    }

    /// The next level down, or `None` at the bottom of the ladder.
    pub fn step_down(self) -> Option<Self> {
        let idx = Self::LADDER.iter().position(|&level| level == self)?;
        idx.checked_sub(1).map(|i| Self::LADDER[i])
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Max => "max",
        }
    }
}

impl fmt::Display for LoadLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a load-change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadDirection {
    Increase,
    Decrease,
}

/// Simulated real consumption, derived from the allocation and the current
/// load factor. Disk is not load-scaled: provisioned space stays in use
/// whatever the workload is doing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActualUsage {
    pub cpu: f64,
    pub ram: f64,
    pub disk: f64,
}

impl ActualUsage {
    pub(crate) fn derive(resources: ResourceSpec, load: LoadLevel) -> Self {
        let factor = load.factor();
        Self {
            cpu: f64::from(resources.cpu) * factor,
            ram: f64::from(resources.ram) * factor,
            disk: f64::from(resources.disk),
        }
    }
}

/// A virtual machine record. Every field is written only by the manager.
#[derive(Debug, Clone, Serialize)]
pub struct Vm {
    pub id: VmId,
    pub name: String,
    #[serde(flatten)]
    pub resources: ResourceSpec,
    pub status: VmStatus,
    pub load: LoadLevel,
    pub actual_usage: ActualUsage,
}

impl Vm {
    /// Resources the pool currently holds for this VM. Suspended VMs keep
    /// only their disk reservation; running and paused VMs hold everything.
    pub(crate) fn held_resources(&self) -> ResourceSpec {
        match self.status {
            VmStatus::Initializing | VmStatus::Running | VmStatus::Paused => self.resources,
            VmStatus::Suspended => {
                ResourceSpec { cpu: 0, ram: 0, disk: self.resources.disk }
            }
            VmStatus::Destroyed => ResourceSpec::default(),
        }
    }

    /// Recompute `actual_usage` from the allocation and current load.
    pub(crate) fn refresh_usage(&mut self) {
        self.actual_usage = ActualUsage::derive(self.resources, self.load);
    }
}
