use std::{env, time::Duration};

use crate::dynamodb::ProvisionSettings;

/// Provisioning configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Seconds to wait for the table to become active (default: 300)
    pub timeout_secs: u64,
    /// Seconds between table status polls (default: 2)
    pub poll_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `VEHICLE_TRACKER_TIMEOUT_SECS` - Wait-for-active timeout (default: 300)
    /// - `VEHICLE_TRACKER_POLL_INTERVAL_SECS` - Status poll interval (default: 2)
    pub fn from_env() -> Self {
        Self {
            timeout_secs: env::var("VEHICLE_TRACKER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            poll_interval_secs: env::var("VEHICLE_TRACKER_POLL_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
        }
    }

    /// Get the wait settings for the provisioner.
    pub fn provision_settings(&self) -> ProvisionSettings {
        ProvisionSettings {
            timeout: Duration::from_secs(self.timeout_secs),
            // A zero interval would make tokio's interval panic.
            poll_interval: Duration::from_secs(self.poll_interval_secs.max(1)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
