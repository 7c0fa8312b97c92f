//! Project entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use workdesk_core::types::{ProjectId, UserId};

use crate::share::SharedUser;

/// A project, the root of one workspace tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// The project owner.
    pub owner_id: UserId,
    /// Users the project is shared with (empty when not shared).
    #[serde(default)]
    pub shared_users: Vec<SharedUser>,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// When the project was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Project name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

/// Data for updating an existing project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProject {
    /// New project name.
    pub name: String,
    /// New description.
    pub description: String,
}
