//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use workdesk_core::types::{FolderId, ProjectId};

/// A folder in the workspace hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// The owning project.
    pub project_id: ProjectId,
    /// Parent folder ID (None for folders at project root).
    pub parent_folder_id: Option<FolderId>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this folder sits at the project root (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_folder_id.is_none()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Parent folder (None for project root).
    pub parent_folder_id: Option<FolderId>,
}

/// Data for updating an existing folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFolder {
    /// New folder name.
    pub name: String,
    /// New parent folder (None moves the folder to project root).
    pub parent_folder_id: Option<FolderId>,
}
