//! Derived content tree shapes for hierarchical display.
//!
//! A [`ContentNode`] is never persisted: the tree is always a pure function
//! of the last-fetched flat folder/document/text lists. It is rebuilt
//! wholesale on every refresh, never partially patched.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::folder::model::Folder;
use crate::text::UserText;

/// A folder wrapped with its resolved children and contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentNode {
    /// The underlying folder.
    pub folder: Folder,
    /// Child folder nodes.
    pub folders: Vec<ContentNode>,
    /// Documents placed in this folder.
    pub documents: Vec<Document>,
    /// Texts placed in this folder.
    pub texts: Vec<UserText>,
    /// Display expansion state (optimistic local state, survives item
    /// re-attachment but not a full rebuild).
    pub is_expanded: bool,
}

impl ContentNode {
    /// Wrap a folder in a node with empty child collections.
    pub fn new(folder: Folder) -> Self {
        Self {
            folder,
            folders: Vec::new(),
            documents: Vec::new(),
            texts: Vec::new(),
            is_expanded: false,
        }
    }

    /// Number of items (documents + texts) directly in this folder.
    pub fn item_count(&self) -> usize {
        self.documents.len() + self.texts.len()
    }

    /// Total number of folders in this subtree, including this one.
    pub fn subtree_folder_count(&self) -> usize {
        1 + self
            .folders
            .iter()
            .map(ContentNode::subtree_folder_count)
            .sum::<usize>()
    }
}
