//! The Workspace API collaborator trait.
//!
//! Everything the session persists or fetches goes through this seam. The
//! HTTP implementation lives in `workdesk-api`; tests substitute a
//! recording mock. All calls are opaque, potentially-failing remote
//! operations; the session's obligations are request shaping, response
//! reconciliation, and error classification.

use async_trait::async_trait;
use bytes::Bytes;

use workdesk_core::types::{DocumentId, FolderId, ProjectId, TaskId, TextId, UserId};
use workdesk_core::AppResult;
use workdesk_entity::{
    CreateFolder, CreateProject, CreateText, Document, Folder, ItemRef, Project, SharedUser,
    SummarizeTask, UpdateFolder, UpdateProject, UpdateText, UserText,
};

/// The project or folder a natural-language question is answered against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskScope {
    /// Answer against a whole project.
    Project(ProjectId),
    /// Answer against a single folder.
    Folder(FolderId),
}

/// Remote Workspace API surface.
#[async_trait]
pub trait WorkspaceApi: Send + Sync + 'static {
    // Projects

    /// Create a new project.
    async fn create_project(&self, create: CreateProject) -> AppResult<Project>;

    /// List projects owned by or shared with the current user.
    async fn list_projects(&self) -> AppResult<Vec<Project>>;

    /// Fetch a single project.
    async fn get_project(&self, id: ProjectId) -> AppResult<Project>;

    /// Update a project's name/description.
    async fn update_project(&self, id: ProjectId, update: UpdateProject) -> AppResult<Project>;

    /// Delete a project. Cascades server-side to folders/documents/texts.
    async fn delete_project(&self, id: ProjectId) -> AppResult<()>;

    // Folders

    /// Create a folder in a project.
    async fn create_folder(&self, project_id: ProjectId, create: CreateFolder)
        -> AppResult<Folder>;

    /// List all folders of a project (flat; nesting is in `parent_folder_id`).
    async fn list_folders(&self, project_id: ProjectId) -> AppResult<Vec<Folder>>;

    /// Rename or re-parent a folder.
    async fn update_folder(
        &self,
        project_id: ProjectId,
        folder_id: FolderId,
        update: UpdateFolder,
    ) -> AppResult<Folder>;

    /// Delete a folder.
    async fn delete_folder(&self, project_id: ProjectId, folder_id: FolderId) -> AppResult<()>;

    // Documents

    /// Upload a document (multipart), optionally into a folder.
    async fn upload_document(
        &self,
        project_id: ProjectId,
        file_name: &str,
        data: Bytes,
        folder_id: Option<FolderId>,
    ) -> AppResult<Document>;

    /// List all documents of a project.
    async fn list_documents(&self, project_id: ProjectId) -> AppResult<Vec<Document>>;

    /// Delete a document.
    async fn delete_document(&self, project_id: ProjectId, id: DocumentId) -> AppResult<()>;

    // Texts

    /// Create a rich-text note.
    async fn create_text(&self, create: CreateText) -> AppResult<UserText>;

    /// Update a text; returns the server's canonical record.
    async fn update_text(&self, id: TextId, update: UpdateText) -> AppResult<UserText>;

    /// List all texts of a project.
    async fn list_texts(&self, project_id: ProjectId) -> AppResult<Vec<UserText>>;

    /// Delete a text.
    async fn delete_text(&self, id: TextId) -> AppResult<()>;

    // Question answering

    /// Ask a question against a scope, optionally narrowed to context items.
    /// Returns the answer string.
    async fn ask(&self, scope: AskScope, question: &str, context: &[ItemRef])
        -> AppResult<String>;

    // Summarization

    /// Start a summarization job; returns the server-assigned task id.
    async fn start_summarize(
        &self,
        project_id: ProjectId,
        folder_id: Option<FolderId>,
    ) -> AppResult<TaskId>;

    /// Poll a summarization job's status.
    async fn summarize_status(&self, task_id: TaskId) -> AppResult<SummarizeTask>;

    /// Request cancellation of a summarization job.
    async fn cancel_summarize(&self, task_id: TaskId) -> AppResult<()>;

    // Sharing

    /// Share a project with a user by email.
    async fn share_project(&self, project_id: ProjectId, email: &str) -> AppResult<SharedUser>;

    /// Revoke a user's access to a project.
    async fn unshare_project(&self, project_id: ProjectId, user_id: UserId) -> AppResult<()>;

    /// List users a project is shared with.
    async fn project_shared_users(&self, project_id: ProjectId) -> AppResult<Vec<SharedUser>>;

    /// Share a text with a user by email.
    async fn share_text(&self, text_id: TextId, email: &str) -> AppResult<SharedUser>;

    /// Revoke a user's access to a text.
    async fn unshare_text(&self, text_id: TextId, user_id: UserId) -> AppResult<()>;

    // Audio transcription

    /// Upload a recorded clip, optionally tied to an existing text. Returns
    /// the transcribed text to be merged into the editor at the cursor.
    async fn transcribe_audio(
        &self,
        clip: Bytes,
        file_name: &str,
        text_id: Option<TextId>,
    ) -> AppResult<String>;
}
