//! Hook loading configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::definition::HookDefinition;

/// Hook definitions and loader settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Per-hook initialization timeout in seconds (0 = no timeout).
    #[serde(default = "default_load_timeout")]
    pub load_timeout_seconds: u64,
    /// Hooks in load order.
    #[serde(default)]
    pub definitions: Vec<HookDefinition>,
}

impl HooksConfig {
    /// Returns the initialization timeout, if any.
    pub fn load_timeout(&self) -> Option<Duration> {
        (self.load_timeout_seconds > 0).then(|| Duration::from_secs(self.load_timeout_seconds))
    }
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            load_timeout_seconds: default_load_timeout(),
            definitions: Vec::new(),
        }
    }
}

fn default_load_timeout() -> u64 {
    30
}
