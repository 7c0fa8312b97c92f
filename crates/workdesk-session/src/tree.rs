//! Content tree construction.
//!
//! Converts the flat folder/document/text lists fetched from the Workspace
//! API into the nested [`ContentNode`] tree. The tree is a pure function of
//! those lists: it is rebuilt wholesale whenever they change and never
//! patched in place.

use std::collections::{HashMap, HashSet};

use workdesk_core::types::FolderId;
use workdesk_entity::{ContentNode, Document, Folder, UserText};

/// Build the nested folder tree from a flat folder list.
///
/// Two-pass, O(n): children are first grouped by parent id, then nodes are
/// assembled from the roots down. The input order does not matter: a child
/// folder may appear before its parent. A folder whose `parent_folder_id`
/// references an id absent from the list is treated as a root rather than
/// dropped.
pub fn build_tree(folders: &[Folder]) -> Vec<ContentNode> {
    let known: HashSet<FolderId> = folders.iter().map(|f| f.id).collect();

    let mut children: HashMap<FolderId, Vec<&Folder>> = HashMap::new();
    let mut roots: Vec<&Folder> = Vec::new();
    for folder in folders {
        match folder.parent_folder_id.filter(|p| known.contains(p)) {
            Some(parent) => children.entry(parent).or_default().push(folder),
            None => roots.push(folder),
        }
    }

    roots
        .into_iter()
        .map(|folder| build_node(folder, &children))
        .collect()
}

fn build_node(folder: &Folder, children: &HashMap<FolderId, Vec<&Folder>>) -> ContentNode {
    let mut node = ContentNode::new(folder.clone());
    if let Some(kids) = children.get(&folder.id) {
        node.folders = kids.iter().map(|f| build_node(f, children)).collect();
    }
    node
}

/// Place documents and texts into their owning folder nodes.
///
/// Idempotent: every node's `documents`/`texts` are cleared before
/// placement, so re-running after an item moves cannot leave duplicates.
/// Items with `folder_id: None` belong at project root and are skipped
/// (they render from the flat lists directly). Items referencing a folder
/// absent from the tree are attached nowhere, hidden until the next
/// refresh reconciles the lists.
pub fn attach_items(tree: &mut [ContentNode], documents: &[Document], texts: &[UserText]) {
    let mut docs_by_folder: HashMap<FolderId, Vec<Document>> = HashMap::new();
    for doc in documents {
        if let Some(folder_id) = doc.folder_id {
            docs_by_folder.entry(folder_id).or_default().push(doc.clone());
        }
    }
    let mut texts_by_folder: HashMap<FolderId, Vec<UserText>> = HashMap::new();
    for text in texts {
        if let Some(folder_id) = text.folder_id {
            texts_by_folder
                .entry(folder_id)
                .or_default()
                .push(text.clone());
        }
    }

    for node in tree.iter_mut() {
        attach_node(node, &mut docs_by_folder, &mut texts_by_folder);
    }

    for orphan in docs_by_folder.values().flatten() {
        tracing::debug!(
            document = %orphan.id,
            folder = ?orphan.folder_id,
            "document references a folder missing from the fetched list; hidden until refresh"
        );
    }
    for orphan in texts_by_folder.values().flatten() {
        tracing::debug!(
            text = %orphan.id,
            folder = ?orphan.folder_id,
            "text references a folder missing from the fetched list; hidden until refresh"
        );
    }
}

fn attach_node(
    node: &mut ContentNode,
    docs_by_folder: &mut HashMap<FolderId, Vec<Document>>,
    texts_by_folder: &mut HashMap<FolderId, Vec<UserText>>,
) {
    node.documents = docs_by_folder.remove(&node.folder.id).unwrap_or_default();
    node.texts = texts_by_folder.remove(&node.folder.id).unwrap_or_default();
    for child in node.folders.iter_mut() {
        attach_node(child, docs_by_folder, texts_by_folder);
    }
}

/// Depth-first search for a folder node by id.
///
/// Terminates because the tree is acyclic by construction.
pub fn find_folder(tree: &[ContentNode], id: FolderId) -> Option<&ContentNode> {
    for node in tree {
        if node.folder.id == id {
            return Some(node);
        }
        if let Some(found) = find_folder(&node.folders, id) {
            return Some(found);
        }
    }
    None
}

/// Mutable variant of [`find_folder`], used for optimistic local state
/// (e.g. toggling `is_expanded`).
pub fn find_folder_mut(tree: &mut [ContentNode], id: FolderId) -> Option<&mut ContentNode> {
    for node in tree.iter_mut() {
        if node.folder.id == id {
            return Some(node);
        }
        if let Some(found) = find_folder_mut(&mut node.folders, id) {
            return Some(found);
        }
    }
    None
}

/// Check whether `candidate` is `folder` itself or one of its descendants.
///
/// Used to reject re-parenting operations that would create a cycle.
pub fn is_self_or_descendant(tree: &[ContentNode], folder: FolderId, candidate: FolderId) -> bool {
    if folder == candidate {
        return true;
    }
    match find_folder(tree, folder) {
        Some(node) => find_folder(&node.folders, candidate).is_some(),
        None => false,
    }
}
