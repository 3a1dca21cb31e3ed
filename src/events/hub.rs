use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::manager::{ActualUsage, LoadLevel, ResourceDelta, VmId, VmStatus};

/// Events that flow from the manager to SSE subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum Event {
    /// A VM completed a lifecycle transition. `resource_delta` is the signed
    /// change the transition made to the pool reservation (zero for pause
    /// and resume, which move no resources).
    StateChanged {
        vm_id: VmId,
        vm_name: String,
        previous_status: VmStatus,
        new_status: VmStatus,
        timestamp: DateTime<Utc>,
        resource_delta: ResourceDelta,
    },

    /// A running VM's simulated workload stepped up or down the ladder. The
    /// allocation is unchanged; `actual_usage` is the recomputed consumption.
    LoadChanged {
        vm_id: VmId,
        vm_name: String,
        previous_load: LoadLevel,
        new_load: LoadLevel,
        actual_usage: ActualUsage,
        timestamp: DateTime<Utc>,
    },

    /// A command failed in a way the UI should display (admission refusals).
    ManagerError { message: String },
}

impl Event {
    /// Returns the SSE event type name for this event variant.
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::StateChanged { .. } => "state_changed",
            Self::LoadChanged { .. } => "load_changed",
            Self::ManagerError { .. } => "manager_error",
        }
    }
}

/// The central event broadcast hub.
///
/// The manager publishes every transition here via `publish()`. SSE endpoint
/// handlers subscribe via `subscribe()` and forward events to the browser.
#[derive(Debug, Clone)]
pub struct EventHub {
    sender: broadcast::Sender<Event>,
}

impl EventHub {
    /// Create a new EventHub with the given channel capacity.
    ///
    /// If subscribers fall behind by more than `capacity` events, they will
    /// receive a `Lagged` error and miss intermediate events. 256 is a safe
    /// default for the expected event rate.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns Ok(subscriber_count) or Err if there are no active subscribers
    /// (which is fine — events are fire-and-forget).
    pub fn publish(&self, event: Event) -> Result<usize, broadcast::error::SendError<Event>> {
        self.sender.send(event)
    }

    /// Subscribe to the event stream. Returns a broadcast Receiver.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }
}
