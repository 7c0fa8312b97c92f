//! Sharing records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use workdesk_core::types::UserId;

/// A user a project or text has been shared with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedUser {
    /// The user's identifier.
    pub id: UserId,
    /// The user's email address (sharing is addressed by email).
    pub email: String,
    /// When access was granted.
    pub shared_at: DateTime<Utc>,
}
