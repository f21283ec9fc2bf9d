// src/config/models.rs
use crate::probe::Target;
use anyhow::{bail, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Endpoints to monitor, probed in the order given here.
    pub targets: Vec<Target>,

    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,

    /// Health percentage below which a cycle raises a critical signal.
    #[serde(default = "default_critical_threshold")]
    pub critical_threshold: f64,

    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// Where to write the text report after a clean shutdown, if anywhere.
    #[serde(default)]
    pub export_path: Option<PathBuf>,
}

fn default_check_interval_secs() -> u64 {
    60
}

fn default_critical_threshold() -> f64 {
    50.0
}

fn default_probe_timeout_secs() -> u64 {
    10
}

impl Config {
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.targets.is_empty() {
            bail!("At least one target must be configured");
        }

        if self.check_interval_secs == 0 {
            bail!("check_interval_secs must be positive");
        }

        if self.probe_timeout_secs == 0 {
            bail!("probe_timeout_secs must be positive");
        }

        if !(0.0..=100.0).contains(&self.critical_threshold) {
            bail!(
                "critical_threshold must be between 0 and 100, got {}",
                self.critical_threshold
            );
        }

        Ok(())
    }
}
