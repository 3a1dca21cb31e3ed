use super::defaults::{
    DEFAULT_CONFIG_PATH, DEFAULT_HOST_CPU, DEFAULT_HOST_DISK, DEFAULT_HOST_RAM, DEFAULT_PORT,
};
use crate::manager::HostCapacity;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Daemon configuration: where to listen and how big the host is.
///
/// Host capacity is fixed for the lifetime of the process; there is no
/// runtime interface to change it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub port: u16,
    pub config_path: String,
    /// Host CPU capacity in whole cores.
    pub host_cpu: u32,
    /// Host RAM capacity in whole GB.
    pub host_ram: u32,
    /// Host disk capacity in whole GB.
    pub host_disk: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            config_path: DEFAULT_CONFIG_PATH.to_string(),
            host_cpu: DEFAULT_HOST_CPU,
            host_ram: DEFAULT_HOST_RAM,
            host_disk: DEFAULT_HOST_DISK,
        }
    }
}

impl AppConfig {
    /// Load configuration, merging defaults with config file values and env
    /// overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("MV_CONFIG_PATH") {
            config.config_path = path;
        }
        if let Ok(port) = std::env::var("MV_PORT") {
            config.port = port.parse().context("MV_PORT must be a valid port number")?;
        }
        if let Ok(v) = std::env::var("MV_HOST_CPU") {
            config.host_cpu = v.parse().context("MV_HOST_CPU must be a whole number of cores")?;
        }
        if let Ok(v) = std::env::var("MV_HOST_RAM") {
            config.host_ram = v.parse().context("MV_HOST_RAM must be a whole number of GB")?;
        }
        if let Ok(v) = std::env::var("MV_HOST_DISK") {
            config.host_disk = v.parse().context("MV_HOST_DISK must be a whole number of GB")?;
        }

        let cfg_path = Path::new(&config.config_path);
        if cfg_path.exists() {
            let contents = fs::read_to_string(cfg_path)
                .with_context(|| format!("Failed to read config file: {}", config.config_path))?;
            config.parse_ini(&contents);
        }

        config.validate()?;
        Ok(config)
    }

    /// The fixed host capacity this daemon manages.
    pub const fn capacity(&self) -> HostCapacity {
        HostCapacity { cpu: self.host_cpu, ram: self.host_ram, disk: self.host_disk }
    }
}
