//! Summarization task tracker configuration.

use serde::{Deserialize, Serialize};

/// Polling configuration for server-side summarization jobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeConfig {
    /// Interval in milliseconds between status polls.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
        }
    }
}

fn default_poll_interval() -> u64 {
    2000
}
