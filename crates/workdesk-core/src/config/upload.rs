//! Upload validation configuration.

use serde::{Deserialize, Serialize};

/// Client-side upload gatekeeping configuration.
///
/// Both checks run before any network call; a rejected file never reaches
/// the Workspace API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum upload size in bytes (default 50 MiB).
    #[serde(default = "default_max_size")]
    pub max_size_bytes: u64,
    /// Allowed file extensions (lowercase, no leading dot).
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: default_max_size(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

fn default_max_size() -> u64 {
    50 * 1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    ["pdf", "doc", "docx", "txt"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
