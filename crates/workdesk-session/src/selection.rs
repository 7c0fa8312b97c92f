//! Viewer and question-context selection.
//!
//! Two independent selections live here. The viewer holds at most one open
//! item (a document or a text, never both); the context set is a multi-
//! select of id+kind pairs used purely to scope question answering.

use workdesk_entity::{Document, ItemRef, UserText, WorkspaceItem};

/// The single item open for viewing/editing.
#[derive(Debug, Clone, Default)]
pub enum Viewer {
    /// Nothing open.
    #[default]
    None,
    /// A document is open in the viewer.
    Document(Document),
    /// A text is open in the editor.
    Text(UserText),
}

impl Viewer {
    fn matches(&self, item: &WorkspaceItem) -> bool {
        match (self, item) {
            (Viewer::Document(open), WorkspaceItem::Document(d)) => open.id == d.id,
            (Viewer::Text(open), WorkspaceItem::Text(t)) => open.id == t.id,
            _ => false,
        }
    }
}

/// Selection state for the open project.
#[derive(Debug, Default)]
pub struct SelectionState {
    viewer: Viewer,
    context_items: Vec<ItemRef>,
}

impl SelectionState {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently open item.
    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// The open document, if the viewer shows one.
    pub fn selected_document(&self) -> Option<&Document> {
        match &self.viewer {
            Viewer::Document(d) => Some(d),
            _ => None,
        }
    }

    /// The open text, if the editor shows one.
    pub fn selected_text(&self) -> Option<&UserText> {
        match &self.viewer {
            Viewer::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Mutable access to the open text, for local edits pending save.
    pub fn selected_text_mut(&mut self) -> Option<&mut UserText> {
        match &mut self.viewer {
            Viewer::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Toggle an item in the viewer.
    ///
    /// Selecting the open item again closes it; selecting anything else
    /// replaces whatever was open, so a document and a text can never be
    /// open at the same time.
    pub fn toggle_viewer(&mut self, item: WorkspaceItem) {
        if self.viewer.matches(&item) {
            self.viewer = Viewer::None;
            return;
        }
        self.viewer = match item {
            WorkspaceItem::Document(d) => Viewer::Document(d),
            WorkspaceItem::Text(t) => Viewer::Text(t),
        };
    }

    /// Close the viewer without touching the context set.
    pub fn close_viewer(&mut self) {
        self.viewer = Viewer::None;
    }

    /// Replace the open text's record in place (post-save reconciliation).
    pub fn reconcile_text(&mut self, saved: &UserText) {
        if let Viewer::Text(open) = &mut self.viewer {
            if open.id == saved.id {
                *open = saved.clone();
            }
        }
    }

    /// Items currently marked as question-answering context.
    pub fn context_items(&self) -> &[ItemRef] {
        &self.context_items
    }

    /// Add or remove an item from the question context.
    pub fn toggle_context(&mut self, item: ItemRef) {
        match self.context_items.iter().position(|r| *r == item) {
            Some(index) => {
                self.context_items.remove(index);
            }
            None => self.context_items.push(item),
        }
    }

    /// Empty the question context (after a successful ask, or on project
    /// deselect).
    pub fn clear_context(&mut self) {
        self.context_items.clear();
    }

    /// Reset both selections.
    pub fn clear(&mut self) {
        self.viewer = Viewer::None;
        self.context_items.clear();
    }
}

/// Root-level documents and texts flattened for list rendering.
///
/// Documents first, then texts; order within each group follows the flat
/// list. Items placed in folders are rendered from the tree instead.
pub fn all_items(documents: &[Document], texts: &[UserText]) -> Vec<WorkspaceItem> {
    documents
        .iter()
        .filter(|d| d.folder_id.is_none())
        .cloned()
        .map(WorkspaceItem::Document)
        .chain(
            texts
                .iter()
                .filter(|t| t.folder_id.is_none())
                .cloned()
                .map(WorkspaceItem::Text),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use workdesk_core::types::{DocumentId, FolderId, ProjectId, TextId};
    use workdesk_entity::ItemKind;

    fn document(name: &str) -> Document {
        Document {
            id: DocumentId::new(),
            name: name.to_string(),
            file_path: format!("uploads/{name}"),
            folder_id: None,
            project_id: ProjectId::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn text(title: &str) -> UserText {
        UserText {
            id: TextId::new(),
            title: title.to_string(),
            content: String::new(),
            folder_id: None,
            project_ids: Vec::new(),
            shared_users: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_toggle_same_item_deselects() {
        let doc = document("a.pdf");
        let mut sel = SelectionState::new();

        sel.toggle_viewer(WorkspaceItem::Document(doc.clone()));
        assert!(sel.selected_document().is_some());

        sel.toggle_viewer(WorkspaceItem::Document(doc));
        assert!(sel.selected_document().is_none());
    }

    #[test]
    fn test_single_viewer_invariant() {
        let doc = document("a.pdf");
        let note = text("notes");
        let mut sel = SelectionState::new();

        // Any interleaving leaves at most one side selected.
        let sequence = [
            WorkspaceItem::Document(doc.clone()),
            WorkspaceItem::Text(note.clone()),
            WorkspaceItem::Document(doc.clone()),
            WorkspaceItem::Document(document("b.pdf")),
            WorkspaceItem::Text(note.clone()),
            WorkspaceItem::Text(text("other")),
        ];
        for item in sequence {
            sel.toggle_viewer(item);
            let both = sel.selected_document().is_some() && sel.selected_text().is_some();
            assert!(!both);
        }
    }

    #[test]
    fn test_selecting_text_closes_document() {
        let doc = document("a.pdf");
        let note = text("notes");
        let mut sel = SelectionState::new();

        sel.toggle_viewer(WorkspaceItem::Document(doc));
        sel.toggle_viewer(WorkspaceItem::Text(note.clone()));
        assert!(sel.selected_document().is_none());
        assert_eq!(sel.selected_text().unwrap().id, note.id);
    }

    #[test]
    fn test_context_is_orthogonal_to_viewer() {
        let doc = document("a.pdf");
        let item = WorkspaceItem::Document(doc.clone());
        let mut sel = SelectionState::new();

        sel.toggle_context(item.item_ref());
        sel.toggle_viewer(item.clone());
        sel.toggle_viewer(item.clone());
        assert_eq!(sel.context_items().len(), 1);

        sel.toggle_context(item.item_ref());
        assert!(sel.context_items().is_empty());
    }

    #[test]
    fn test_all_items_order_and_root_filter() {
        let mut folder_doc = document("tucked.pdf");
        folder_doc.folder_id = Some(FolderId::new());
        let docs = [document("a.pdf"), folder_doc];
        let texts = [text("notes")];

        let items = all_items(&docs, &texts);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].kind(), ItemKind::Document);
        assert_eq!(items[1].kind(), ItemKind::Text);
    }
}
