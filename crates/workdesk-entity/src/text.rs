//! Rich-text note entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use workdesk_core::types::{FolderId, ProjectId, TextId};

use crate::share::SharedUser;

/// A user-authored rich-text note. Content is mutable and auto-saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserText {
    /// Unique text identifier.
    pub id: TextId,
    /// The note title.
    pub title: String,
    /// The note body.
    pub content: String,
    /// The folder containing this text (None = project root).
    pub folder_id: Option<FolderId>,
    /// Projects this text belongs to.
    #[serde(default)]
    pub project_ids: Vec<ProjectId>,
    /// Users this text is shared with (empty when not shared).
    #[serde(default)]
    pub shared_users: Vec<SharedUser>,
    /// When the text was created.
    pub created_at: DateTime<Utc>,
    /// When the text was last updated.
    pub updated_at: DateTime<Utc>,
}

impl UserText {
    /// Insert a fragment into the content at a character offset.
    ///
    /// Offsets past the end append. The offset is interpreted in characters
    /// so a cursor position from the editor can never split a UTF-8
    /// sequence.
    pub fn insert_at(&mut self, char_offset: usize, fragment: &str) {
        let byte_offset = self
            .content
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len());
        self.content.insert_str(byte_offset, fragment);
    }
}

/// Data required to create a new text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateText {
    /// The note title.
    pub title: String,
    /// The note body.
    pub content: String,
    /// Projects the text belongs to.
    pub project_ids: Vec<ProjectId>,
    /// Target folder (None = project root).
    pub folder_id: Option<FolderId>,
}

/// Data for updating an existing text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateText {
    /// New title.
    pub title: String,
    /// New body.
    pub content: String,
    /// Projects the text belongs to.
    pub project_ids: Vec<ProjectId>,
    /// Target folder (None = project root).
    pub folder_id: Option<FolderId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(content: &str) -> UserText {
        UserText {
            id: TextId::new(),
            title: "t".to_string(),
            content: content.to_string(),
            folder_id: None,
            project_ids: Vec::new(),
            shared_users: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_insert_at_middle() {
        let mut t = text("hello world");
        t.insert_at(6, "brave ");
        assert_eq!(t.content, "hello brave world");
    }

    #[test]
    fn test_insert_at_past_end_appends() {
        let mut t = text("abc");
        t.insert_at(99, "def");
        assert_eq!(t.content, "abcdef");
    }

    #[test]
    fn test_insert_at_respects_char_boundaries() {
        let mut t = text("héllo");
        t.insert_at(2, "X");
        assert_eq!(t.content, "héXllo");
    }
}
