use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::events::EventHub;
use crate::manager::VmManager;

/// Shared application state passed to all API handlers via axum's State
/// extractor.
///
/// The single `RwLock` guards the VM collection and the resource pool
/// together: every mutating command takes the write lock, so check-then-act
/// sequences against shared usage never interleave. Read-only queries share
/// the read lock.
pub struct AppState {
    pub config: AppConfig,
    pub event_hub: EventHub,
    pub manager: RwLock<VmManager>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: AppConfig, event_hub: EventHub) -> Self {
        let manager = VmManager::new(config.capacity(), event_hub.clone());
        Self { config, event_hub, manager: RwLock::new(manager), started_at: Utc::now() }
    }
}
