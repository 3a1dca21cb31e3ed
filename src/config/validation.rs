use super::settings::AppConfig;
use anyhow::Result;

impl AppConfig {
    /// Validate configuration values are sane.
    pub(crate) fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.port > 0, "Port must be > 0");
        anyhow::ensure!(
            (1..=1024).contains(&self.host_cpu),
            "host_cpu must be between 1 and 1024 cores"
        );
        anyhow::ensure!(self.host_ram >= 1, "host_ram must be at least 1 GB");
        anyhow::ensure!(self.host_disk >= 1, "host_disk must be at least 1 GB");
        Ok(())
    }
}
