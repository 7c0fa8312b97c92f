//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod api;
pub mod autosave;
pub mod logging;
pub mod summarize;
pub mod upload;

use serde::{Deserialize, Serialize};

use self::api::ApiConfig;
use self::autosave::AutosaveConfig;
use self::logging::LoggingConfig;
use self::summarize::SummarizeConfig;
use self::upload::UploadConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Workspace API endpoint settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Upload validation settings.
    #[serde(default)]
    pub upload: UploadConfig,
    /// Auto-save pipeline settings.
    #[serde(default)]
    pub autosave: AutosaveConfig,
    /// Summarization task tracker settings.
    #[serde(default)]
    pub summarize: SummarizeConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `WORKDESK_`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("WORKDESK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
