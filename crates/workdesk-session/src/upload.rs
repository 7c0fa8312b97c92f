//! Client-side upload gatekeeping.
//!
//! Both checks run before any network call; a rejected file never reaches
//! the Workspace API. The extension check runs before the size check, and
//! only the first violation is reported.

use workdesk_core::config::upload::UploadConfig;
use workdesk_core::AppError;

/// Why a file was rejected before upload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    /// The file's extension is not on the allow-list.
    #[error("file type not allowed: {file_name} (allowed: {allowed})")]
    UnsupportedExtension {
        /// The offending file name.
        file_name: String,
        /// Comma-separated allow-list for the message.
        allowed: String,
    },
    /// The file exceeds the size ceiling.
    #[error("file too large: {size_bytes} bytes (limit {max_bytes})")]
    TooLarge {
        /// Size of the offending file.
        size_bytes: u64,
        /// The configured ceiling.
        max_bytes: u64,
    },
}

impl From<UploadRejection> for AppError {
    fn from(rejection: UploadRejection) -> Self {
        AppError::validation(rejection.to_string())
    }
}

/// Validates files against the configured allow-list and size ceiling.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    allowed_extensions: Vec<String>,
    max_size_bytes: u64,
}

impl UploadValidator {
    /// Build a validator from configuration. Extensions are normalized to
    /// lowercase once here so each check is a plain comparison.
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
            max_size_bytes: config.max_size_bytes,
        }
    }

    /// Check a file before it is handed to the network layer.
    pub fn validate(&self, file_name: &str, size_bytes: u64) -> Result<(), UploadRejection> {
        let extension = file_name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != file_name)
            .map(|ext| ext.to_lowercase());

        let allowed = match extension {
            Some(ext) => self.allowed_extensions.iter().any(|a| *a == ext),
            None => false,
        };
        if !allowed {
            return Err(UploadRejection::UnsupportedExtension {
                file_name: file_name.to_string(),
                allowed: self.allowed_extensions.join(", "),
            });
        }

        if size_bytes > self.max_size_bytes {
            return Err(UploadRejection::TooLarge {
                size_bytes,
                max_bytes: self.max_size_bytes,
            });
        }

        Ok(())
    }
}
