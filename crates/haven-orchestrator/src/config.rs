//! Orchestrator configuration

use haven_core::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Runtime configuration for the mode orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Seconds of silence after a crisis risk message before alerting
    #[serde(default = "default_crisis_deadline_secs")]
    pub crisis_deadline_secs: u64,

    /// Seconds of silence after a supervision risk message before alerting
    #[serde(default = "default_supervision_deadline_secs")]
    pub supervision_deadline_secs: u64,

    /// Capacity of the alert broadcast channel
    #[serde(default = "default_alert_capacity")]
    pub alert_channel_capacity: usize,
}

impl OrchestratorConfig {
    /// Load configuration from a YAML file, or defaults if it does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| haven_core::Error::config(format!("Failed to parse {path:?}: {e}")))
    }

    /// Crisis escalation deadline
    pub fn crisis_deadline(&self) -> Duration {
        Duration::from_secs(self.crisis_deadline_secs)
    }

    /// Supervision escalation deadline
    pub fn supervision_deadline(&self) -> Duration {
        Duration::from_secs(self.supervision_deadline_secs)
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            crisis_deadline_secs: default_crisis_deadline_secs(),
            supervision_deadline_secs: default_supervision_deadline_secs(),
            alert_channel_capacity: default_alert_capacity(),
        }
    }
}

fn default_crisis_deadline_secs() -> u64 {
    300
}

fn default_supervision_deadline_secs() -> u64 {
    600
}

fn default_alert_capacity() -> usize {
    256
}
