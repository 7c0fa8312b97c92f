//! The workspace session value object.
//!
//! One `WorkspaceSession` owns everything scoped to the currently open
//! project: the flat entity lists, the derived content tree, navigation and
//! selection state, the auto-save pipeline, and the summarize tracker. The
//! UI layer holds a single mutable reference to it and drains its event
//! stream; all persistence flows through the `WorkspaceApi` collaborator.
//!
//! Everything here is rebuilt or discarded when the user switches or
//! deselects a project; no state crosses projects.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;

use workdesk_core::config::AppConfig;
use workdesk_core::error::ErrorKind;
use workdesk_core::types::{DocumentId, FolderId, ProjectId, TaskId, TextId, UserId};
use workdesk_core::{AppError, AppResult};
use workdesk_entity::{
    ContentNode, CreateFolder, CreateProject, CreateText, Document, Folder, ItemRef, Project,
    SharedUser, UpdateFolder, UpdateProject, UpdateText, UserText, WorkspaceItem,
};

use crate::api::{AskScope, WorkspaceApi};
use crate::autosave::{AutosavePipeline, SavePayload};
use crate::events::{SessionEvent, SummarizeOutcome};
use crate::navigation::NavigationState;
use crate::selection::{all_items, SelectionState};
use crate::tracker::{SummarizeTracker, TrackerState};
use crate::tree::{attach_items, build_tree, find_folder_mut, is_self_or_descendant};
use crate::upload::UploadValidator;

/// Client-side state and coordination for one user's workspace.
pub struct WorkspaceSession {
    api: Arc<dyn WorkspaceApi>,
    project: Option<Project>,
    folders: Vec<Folder>,
    documents: Vec<Document>,
    texts: Vec<UserText>,
    tree: Vec<ContentNode>,
    navigation: NavigationState,
    selection: SelectionState,
    autosave: AutosavePipeline,
    tracker: SummarizeTracker,
    validator: UploadValidator,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl std::fmt::Debug for WorkspaceSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceSession")
            .field("project", &self.project.as_ref().map(|p| p.id))
            .field("folders", &self.folders.len())
            .field("documents", &self.documents.len())
            .field("texts", &self.texts.len())
            .finish()
    }
}

impl WorkspaceSession {
    /// Create a session with no project open.
    pub fn new(api: Arc<dyn WorkspaceApi>, config: &AppConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            autosave: AutosavePipeline::new(Arc::clone(&api), events_tx.clone(), &config.autosave),
            tracker: SummarizeTracker::new(Arc::clone(&api), events_tx, &config.summarize),
            validator: UploadValidator::new(&config.upload),
            api,
            project: None,
            folders: Vec::new(),
            documents: Vec::new(),
            texts: Vec::new(),
            tree: Vec::new(),
            navigation: NavigationState::new(),
            selection: SelectionState::new(),
            events_rx,
        }
    }

    // Accessors

    /// The open project, if any.
    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    /// Flat folder list of the open project.
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    /// Flat document list of the open project.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Flat text list of the open project.
    pub fn texts(&self) -> &[UserText] {
        &self.texts
    }

    /// The derived content tree.
    pub fn tree(&self) -> &[ContentNode] {
        &self.tree
    }

    /// Navigation state (read-only; mutate through the session methods).
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Selection state (read-only; mutate through the session methods).
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Summarize tracker lifecycle state.
    pub fn tracker_state(&self) -> TrackerState {
        self.tracker.state()
    }

    fn require_project(&self) -> AppResult<&Project> {
        self.project
            .as_ref()
            .ok_or_else(|| AppError::validation("no project is open"))
    }

    fn rebuild_tree(&mut self) {
        self.tree = build_tree(&self.folders);
        attach_items(&mut self.tree, &self.documents, &self.texts);
    }

    fn reattach_items(&mut self) {
        attach_items(&mut self.tree, &self.documents, &self.texts);
    }

    // Project surface

    /// List projects owned by or shared with the user.
    pub async fn list_projects(&self) -> AppResult<Vec<Project>> {
        self.api.list_projects().await
    }

    /// Create a project. The name is required.
    pub async fn create_project(&self, name: &str, description: &str) -> AppResult<Project> {
        if name.trim().is_empty() {
            return Err(AppError::validation("project name must not be empty"));
        }
        self.api
            .create_project(CreateProject {
                name: name.to_string(),
                description: description.to_string(),
            })
            .await
    }

    /// Update a project's name/description; reconciles the open project.
    pub async fn update_project(
        &mut self,
        id: ProjectId,
        name: &str,
        description: &str,
    ) -> AppResult<Project> {
        if name.trim().is_empty() {
            return Err(AppError::validation("project name must not be empty"));
        }
        let updated = self
            .api
            .update_project(
                id,
                UpdateProject {
                    name: name.to_string(),
                    description: description.to_string(),
                },
            )
            .await?;
        if self.project.as_ref().is_some_and(|p| p.id == id) {
            self.project = Some(updated.clone());
        }
        Ok(updated)
    }

    /// Delete a project. A project already gone server-side is treated as
    /// deleted; the open session is discarded either way.
    pub async fn delete_project(&mut self, id: ProjectId) -> AppResult<()> {
        match self.api.delete_project(id).await {
            Ok(()) => {}
            Err(err) if err.kind == ErrorKind::NotFound => {
                tracing::info!(project = %id, "project already deleted server-side");
            }
            Err(err) => return Err(err),
        }
        if self.project.as_ref().is_some_and(|p| p.id == id) {
            self.deselect_project();
        }
        Ok(())
    }

    /// Open a project: fetch its folders, documents, and texts, and build
    /// the content tree. Any previously open project is discarded first.
    pub async fn open_project(&mut self, id: ProjectId) -> AppResult<()> {
        self.deselect_project();

        let project = self.api.get_project(id).await?;
        self.folders = self.api.list_folders(id).await?;
        self.documents = self.api.list_documents(id).await?;
        self.texts = self.api.list_texts(id).await?;
        tracing::info!(
            project = %id,
            folders = self.folders.len(),
            documents = self.documents.len(),
            texts = self.texts.len(),
            "project opened"
        );
        self.project = Some(project);
        self.rebuild_tree();
        Ok(())
    }

    /// Re-fetch the flat lists and rebuild the tree wholesale.
    ///
    /// Navigation entries pointing at folders that vanished server-side are
    /// pruned; if the currently viewed folder is among them the session
    /// falls back to project root.
    pub async fn refresh(&mut self) -> AppResult<()> {
        let project_id = self.require_project()?.id;
        self.folders = self.api.list_folders(project_id).await?;
        self.documents = self.api.list_documents(project_id).await?;
        self.texts = self.api.list_texts(project_id).await?;
        self.rebuild_tree();

        let known: std::collections::HashSet<FolderId> =
            self.folders.iter().map(|f| f.id).collect();
        self.navigation.retain(|f| known.contains(&f.id));
        Ok(())
    }

    /// Close the open project and discard all of its state, cancelling
    /// every core-owned timer.
    pub fn deselect_project(&mut self) {
        self.dispose();
        self.project = None;
        self.folders.clear();
        self.documents.clear();
        self.texts.clear();
        self.tree.clear();
        self.navigation.go_home();
        self.selection.clear();
    }

    /// Cancel every core-owned timer. The single teardown path: no
    /// background timer can outlive the session.
    pub fn dispose(&mut self) {
        self.autosave.dispose();
        self.tracker.dispose();
    }

    // Navigation

    /// Enter a folder by id.
    pub fn enter_folder(&mut self, id: FolderId) -> AppResult<()> {
        let folder = self
            .folders
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("folder {id} not found")))?;
        self.navigation.select_folder(folder);
        Ok(())
    }

    /// Step back in folder history.
    pub fn go_back(&mut self) {
        self.navigation.go_back();
    }

    /// Step forward in folder history.
    pub fn go_forward(&mut self) {
        self.navigation.go_forward();
    }

    /// Return to project root.
    pub fn go_home(&mut self) {
        self.navigation.go_home();
    }

    /// Toggle a folder's display expansion (optimistic local state).
    pub fn toggle_expanded(&mut self, id: FolderId) {
        if let Some(node) = find_folder_mut(&mut self.tree, id) {
            node.is_expanded = !node.is_expanded;
        }
    }

    // Selection

    /// Toggle an item in the viewer (single-viewer semantics).
    pub fn toggle_item(&mut self, item: WorkspaceItem) {
        self.selection.toggle_viewer(item);
    }

    /// Toggle an item in the question-answering context.
    pub fn toggle_context(&mut self, item: ItemRef) {
        self.selection.toggle_context(item);
    }

    /// Root-level documents and texts for list rendering.
    pub fn all_items(&self) -> Vec<WorkspaceItem> {
        all_items(&self.documents, &self.texts)
    }

    // Folders

    /// Create a folder under the currently viewed folder (project root when
    /// none is open).
    pub async fn create_folder(&mut self, name: &str) -> AppResult<Folder> {
        let project_id = self.require_project()?.id;
        if name.trim().is_empty() {
            return Err(AppError::validation("folder name must not be empty"));
        }
        let parent = self.navigation.current().map(|f| f.id);
        let folder = self
            .api
            .create_folder(
                project_id,
                CreateFolder {
                    name: name.to_string(),
                    parent_folder_id: parent,
                },
            )
            .await?;
        self.folders.push(folder.clone());
        self.rebuild_tree();
        Ok(folder)
    }

    /// Rename a folder.
    pub async fn rename_folder(&mut self, id: FolderId, name: &str) -> AppResult<Folder> {
        let project_id = self.require_project()?.id;
        if name.trim().is_empty() {
            return Err(AppError::validation("folder name must not be empty"));
        }
        let parent = self
            .folders
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| AppError::not_found(format!("folder {id} not found")))?
            .parent_folder_id;
        let updated = self
            .api
            .update_folder(
                project_id,
                id,
                UpdateFolder {
                    name: name.to_string(),
                    parent_folder_id: parent,
                },
            )
            .await?;
        self.replace_folder(updated.clone());
        Ok(updated)
    }

    /// Move a folder under a new parent (None = project root).
    ///
    /// Re-parenting a folder under itself or one of its own descendants
    /// would create a cycle and is rejected before any network call.
    pub async fn move_folder(
        &mut self,
        id: FolderId,
        new_parent: Option<FolderId>,
    ) -> AppResult<Folder> {
        let project_id = self.require_project()?.id;
        let name = self
            .folders
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| AppError::not_found(format!("folder {id} not found")))?
            .name
            .clone();
        if let Some(parent) = new_parent {
            if is_self_or_descendant(&self.tree, id, parent) {
                return Err(AppError::validation(
                    "a folder cannot be moved under itself or one of its descendants",
                ));
            }
        }
        let updated = self
            .api
            .update_folder(
                project_id,
                id,
                UpdateFolder {
                    name,
                    parent_folder_id: new_parent,
                },
            )
            .await?;
        self.replace_folder(updated.clone());
        Ok(updated)
    }

    /// Delete a folder. Server-side cascade may remove nested content, so
    /// the session re-fetches everything.
    pub async fn delete_folder(&mut self, id: FolderId) -> AppResult<()> {
        let project_id = self.require_project()?.id;
        self.api.delete_folder(project_id, id).await?;
        self.refresh().await
    }

    fn replace_folder(&mut self, folder: Folder) {
        if let Some(entry) = self.folders.iter_mut().find(|f| f.id == folder.id) {
            *entry = folder;
        }
        self.rebuild_tree();
    }

    // Documents

    /// Validate and upload a document into the currently viewed folder.
    ///
    /// A file that fails validation never reaches the Workspace API.
    pub async fn upload_document(&mut self, file_name: &str, data: Bytes) -> AppResult<Document> {
        let project_id = self.require_project()?.id;
        self.validator
            .validate(file_name, data.len() as u64)
            .map_err(AppError::from)?;

        let folder = self.navigation.current().map(|f| f.id);
        let document = self
            .api
            .upload_document(project_id, file_name, data, folder)
            .await?;
        tracing::info!(document = %document.id, name = %file_name, "document uploaded");
        self.documents.push(document.clone());
        self.reattach_items();
        Ok(document)
    }

    /// Delete a document and drop it from every view.
    pub async fn delete_document(&mut self, id: DocumentId) -> AppResult<()> {
        let project_id = self.require_project()?.id;
        self.api.delete_document(project_id, id).await?;
        self.documents.retain(|d| d.id != id);
        if self
            .selection
            .selected_document()
            .is_some_and(|d| d.id == id)
        {
            self.selection.close_viewer();
        }
        self.reattach_items();
        Ok(())
    }

    // Texts

    /// Create a text in the currently viewed folder.
    pub async fn create_text(&mut self, title: &str, content: &str) -> AppResult<UserText> {
        let project_id = self.require_project()?.id;
        if title.trim().is_empty() {
            return Err(AppError::validation("text title must not be empty"));
        }
        let text = self
            .api
            .create_text(CreateText {
                title: title.to_string(),
                content: content.to_string(),
                project_ids: vec![project_id],
                folder_id: self.navigation.current().map(|f| f.id),
            })
            .await?;
        self.texts.push(text.clone());
        self.reattach_items();
        Ok(text)
    }

    /// Apply an edit to the open text and schedule a debounced save.
    ///
    /// The payload is captured now: switching to another text before the
    /// timer fires still persists this content.
    pub fn edit_text(&mut self, title: &str, content: &str) -> AppResult<()> {
        let open = self
            .selection
            .selected_text_mut()
            .ok_or_else(|| AppError::validation("no text is open for editing"))?;
        open.title = title.to_string();
        open.content = content.to_string();
        let payload = SavePayload::capture(open);

        let id = payload.text_id;
        if let Some(entry) = self.texts.iter_mut().find(|t| t.id == id) {
            entry.title = title.to_string();
            entry.content = content.to_string();
        }

        self.autosave.schedule(payload);
        Ok(())
    }

    /// Move a text to another folder (None = project root).
    pub async fn move_text(&mut self, id: TextId, folder: Option<FolderId>) -> AppResult<UserText> {
        let text = self
            .texts
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("text {id} not found")))?;
        let updated = self
            .api
            .update_text(
                id,
                UpdateText {
                    title: text.title,
                    content: text.content,
                    project_ids: text.project_ids,
                    folder_id: folder,
                },
            )
            .await?;
        self.reconcile_text(updated.clone());
        Ok(updated)
    }

    /// Delete a text and drop it from every view.
    pub async fn delete_text(&mut self, id: TextId) -> AppResult<()> {
        self.api.delete_text(id).await?;
        self.texts.retain(|t| t.id != id);
        if self.selection.selected_text().is_some_and(|t| t.id == id) {
            self.selection.close_viewer();
        }
        self.reattach_items();
        Ok(())
    }

    fn reconcile_text(&mut self, saved: UserText) {
        if let Some(entry) = self.texts.iter_mut().find(|t| t.id == saved.id) {
            *entry = saved.clone();
        }
        self.selection.reconcile_text(&saved);
        self.reattach_items();
    }

    // Question answering

    /// Ask a question scoped to the currently viewed folder, or to the
    /// whole project at root. Selected context items narrow the answer;
    /// the context set is cleared once an answer arrives.
    pub async fn ask_question(&mut self, question: &str) -> AppResult<String> {
        let project_id = self.require_project()?.id;
        if question.trim().is_empty() {
            return Err(AppError::validation("question must not be empty"));
        }
        let scope = match self.navigation.current() {
            Some(folder) => AskScope::Folder(folder.id),
            None => AskScope::Project(project_id),
        };
        let answer = self
            .api
            .ask(scope, question, self.selection.context_items())
            .await?;
        self.selection.clear_context();
        Ok(answer)
    }

    // Summarization

    /// Start a summarization job over the currently viewed folder, or the
    /// whole project at root. At most one job is tracked at a time.
    pub async fn summarize(&mut self) -> AppResult<TaskId> {
        let project_id = self.require_project()?.id;
        let folder = self.navigation.current().map(|f| f.id);
        self.tracker.start(project_id, folder).await
    }

    /// Stop watching the running summarization job. Idempotent.
    pub fn cancel_summarize(&mut self) {
        self.tracker.cancel();
    }

    // Sharing

    /// Share the open project with a user by email.
    pub async fn share_project(&mut self, email: &str) -> AppResult<SharedUser> {
        let project_id = self.require_project()?.id;
        if email.trim().is_empty() {
            return Err(AppError::validation("email must not be empty"));
        }
        let shared = self.api.share_project(project_id, email).await?;
        if let Some(project) = &mut self.project {
            project.shared_users.push(shared.clone());
        }
        Ok(shared)
    }

    /// Revoke a user's access to the open project.
    pub async fn unshare_project(&mut self, user_id: UserId) -> AppResult<()> {
        let project_id = self.require_project()?.id;
        self.api.unshare_project(project_id, user_id).await?;
        if let Some(project) = &mut self.project {
            project.shared_users.retain(|u| u.id != user_id);
        }
        Ok(())
    }

    /// Re-fetch the open project's shared users.
    pub async fn shared_users(&mut self) -> AppResult<Vec<SharedUser>> {
        let project_id = self.require_project()?.id;
        let users = self.api.project_shared_users(project_id).await?;
        if let Some(project) = &mut self.project {
            project.shared_users = users.clone();
        }
        Ok(users)
    }

    /// Share a text with a user by email.
    pub async fn share_text(&mut self, text_id: TextId, email: &str) -> AppResult<SharedUser> {
        if email.trim().is_empty() {
            return Err(AppError::validation("email must not be empty"));
        }
        let shared = self.api.share_text(text_id, email).await?;
        if let Some(entry) = self.texts.iter_mut().find(|t| t.id == text_id) {
            entry.shared_users.push(shared.clone());
        }
        Ok(shared)
    }

    /// Revoke a user's access to a text.
    pub async fn unshare_text(&mut self, text_id: TextId, user_id: UserId) -> AppResult<()> {
        self.api.unshare_text(text_id, user_id).await?;
        if let Some(entry) = self.texts.iter_mut().find(|t| t.id == text_id) {
            entry.shared_users.retain(|u| u.id != user_id);
        }
        Ok(())
    }

    // Audio transcription

    /// Transcribe a recorded clip and merge the transcript into the open
    /// text at the cursor, then schedule a save. Returns the transcript.
    pub async fn transcribe_audio(
        &mut self,
        clip: Bytes,
        file_name: &str,
        cursor: usize,
    ) -> AppResult<String> {
        let text_id = self
            .selection
            .selected_text()
            .map(|t| t.id)
            .ok_or_else(|| AppError::validation("no text is open for editing"))?;

        let transcript = self
            .api
            .transcribe_audio(clip, file_name, Some(text_id))
            .await?;

        let (title, content) = {
            let open = self
                .selection
                .selected_text_mut()
                .ok_or_else(|| AppError::internal("open text vanished during transcription"))?;
            open.insert_at(cursor, &transcript);
            (open.title.clone(), open.content.clone())
        };
        self.edit_text(&title, &content)?;
        Ok(transcript)
    }

    // Events

    /// Await the next background event and apply its state effects.
    ///
    /// `TextSaved` replaces the local record with the server's canonical
    /// one; a completed summarization refreshes the content tree (the job
    /// produced a new document) before the event is handed to the caller.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        let event = self.events_rx.recv().await?;
        self.apply_event(&event).await;
        Some(event)
    }

    /// Non-blocking variant of [`Self::next_event`].
    pub async fn try_next_event(&mut self) -> Option<SessionEvent> {
        let event = self.events_rx.try_recv().ok()?;
        self.apply_event(&event).await;
        Some(event)
    }

    async fn apply_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::TextSaved(saved) => {
                self.reconcile_text(saved.clone());
            }
            SessionEvent::AutosaveFailed { text_id, message } => {
                tracing::warn!(text = %text_id, %message, "auto-save failure surfaced");
            }
            SessionEvent::SummarizeFinished {
                outcome: SummarizeOutcome::Completed { .. },
                ..
            } => {
                if let Err(err) = self.refresh().await {
                    tracing::warn!(error = %err, "refresh after summarization failed");
                }
            }
            SessionEvent::SummarizeFinished { .. } | SessionEvent::SummarizeProgress { .. } => {}
        }
    }
}
