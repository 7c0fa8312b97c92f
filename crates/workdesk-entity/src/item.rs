//! The `WorkspaceItem` sum type.
//!
//! Documents and texts travel together through viewer selection and
//! question-answering context. Discriminating them with an enum keeps every
//! consumer exhaustive; there are no structural "has a file_path field"
//! checks anywhere in the codebase.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use workdesk_core::types::FolderId;

use crate::document::Document;
use crate::text::UserText;

/// Discriminant for the two viewable item kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// An uploaded binary document.
    Document,
    /// A rich-text note.
    Text,
}

impl ItemKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Text => "text",
        }
    }
}

/// A lightweight id+kind pair identifying an item without owning it.
///
/// Used as the key for the question-answering context multi-select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    /// The item's raw identifier.
    pub id: Uuid,
    /// Which kind of item the id refers to.
    pub kind: ItemKind,
}

/// Either a document or a text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WorkspaceItem {
    /// An uploaded binary document.
    Document(Document),
    /// A rich-text note.
    Text(UserText),
}

impl WorkspaceItem {
    /// The item's raw identifier.
    pub fn id(&self) -> Uuid {
        match self {
            Self::Document(d) => d.id.into_uuid(),
            Self::Text(t) => t.id.into_uuid(),
        }
    }

    /// The item's kind discriminant.
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Document(_) => ItemKind::Document,
            Self::Text(_) => ItemKind::Text,
        }
    }

    /// The item's display name (document name or text title).
    pub fn name(&self) -> &str {
        match self {
            Self::Document(d) => &d.name,
            Self::Text(t) => &t.title,
        }
    }

    /// The folder the item is placed in (None = project root).
    pub fn folder_id(&self) -> Option<FolderId> {
        match self {
            Self::Document(d) => d.folder_id,
            Self::Text(t) => t.folder_id,
        }
    }

    /// The id+kind reference for this item.
    pub fn item_ref(&self) -> ItemRef {
        ItemRef {
            id: self.id(),
            kind: self.kind(),
        }
    }
}
