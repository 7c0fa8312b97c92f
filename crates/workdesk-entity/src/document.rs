//! Document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use workdesk_core::types::{DocumentId, FolderId, ProjectId};

/// An uploaded binary document.
///
/// Content is immutable from the client's perspective; only metadata and
/// folder placement change after upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier.
    pub id: DocumentId,
    /// The file name (including extension).
    pub name: String,
    /// Server-side storage path.
    pub file_path: String,
    /// The folder containing this document (None = project root).
    pub folder_id: Option<FolderId>,
    /// The owning project.
    pub project_id: ProjectId,
    /// When the document was uploaded.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }
}
