//! Auto-save pipeline configuration.

use serde::{Deserialize, Serialize};

/// Debounced auto-save configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutosaveConfig {
    /// Debounce delay in milliseconds. Only the timer that survives the
    /// full delay without being superseded fires the persist call.
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce(),
        }
    }
}

fn default_debounce() -> u64 {
    1000
}
