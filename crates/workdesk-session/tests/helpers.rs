//! Shared test helpers: entity builders and a recording Workspace API mock.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;

use workdesk_core::config::AppConfig;
use workdesk_core::types::{DocumentId, FolderId, ProjectId, TaskId, TextId, UserId};
use workdesk_core::{AppError, AppResult};
use workdesk_entity::{
    CreateFolder, CreateProject, CreateText, Document, Folder, ItemRef, Project, SharedUser,
    SummarizeStatus, SummarizeTask, UpdateFolder, UpdateProject, UpdateText, UserText,
};
use workdesk_session::api::{AskScope, WorkspaceApi};
use workdesk_session::WorkspaceSession;

pub fn project(name: &str) -> Project {
    Project {
        id: ProjectId::new(),
        name: name.to_string(),
        description: String::new(),
        owner_id: UserId::new(),
        shared_users: Vec::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn folder(project_id: ProjectId, name: &str, parent: Option<FolderId>) -> Folder {
    Folder {
        id: FolderId::new(),
        name: name.to_string(),
        project_id,
        parent_folder_id: parent,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn document(project_id: ProjectId, name: &str, folder_id: Option<FolderId>) -> Document {
    Document {
        id: DocumentId::new(),
        name: name.to_string(),
        file_path: format!("uploads/{name}"),
        folder_id,
        project_id,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn text(project_id: ProjectId, title: &str, folder_id: Option<FolderId>) -> UserText {
    UserText {
        id: TextId::new(),
        title: title.to_string(),
        content: String::new(),
        folder_id,
        project_ids: vec![project_id],
        shared_users: Vec::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn status(status: SummarizeStatus) -> SummarizeTask {
    SummarizeTask {
        task_id: TaskId::new(),
        status,
        result_url: None,
        error_message: None,
    }
}

pub fn completed_status(result_url: &str) -> SummarizeTask {
    SummarizeTask {
        task_id: TaskId::new(),
        status: SummarizeStatus::Completed,
        result_url: Some(result_url.to_string()),
        error_message: None,
    }
}

/// Recording in-memory stand-in for the Workspace API.
///
/// Entity vecs are both the seed data and the observable server state;
/// call counters and recorded arguments drive the coordination assertions.
#[derive(Default)]
pub struct MockWorkspaceApi {
    pub projects: Mutex<Vec<Project>>,
    pub folders: Mutex<Vec<Folder>>,
    pub documents: Mutex<Vec<Document>>,
    pub texts: Mutex<Vec<UserText>>,

    pub update_text_calls: Mutex<Vec<(TextId, UpdateText)>>,
    pub fail_update_text: AtomicBool,

    pub ask_calls: Mutex<Vec<(String, usize)>>,

    pub start_calls: AtomicUsize,
    pub fail_start: AtomicBool,
    pub status_calls: AtomicUsize,
    pub status_responses: Mutex<VecDeque<AppResult<SummarizeTask>>>,
    pub cancel_calls: AtomicUsize,
    pub fail_cancel: AtomicBool,

    pub upload_calls: AtomicUsize,
    pub update_folder_calls: AtomicUsize,
    pub list_folder_calls: AtomicUsize,
}

impl MockWorkspaceApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_project(&self, p: &Project) {
        self.projects.lock().unwrap().push(p.clone());
    }

    pub fn seed_folder(&self, f: &Folder) {
        self.folders.lock().unwrap().push(f.clone());
    }

    pub fn seed_document(&self, d: &Document) {
        self.documents.lock().unwrap().push(d.clone());
    }

    pub fn seed_text(&self, t: &UserText) {
        self.texts.lock().unwrap().push(t.clone());
    }

    pub fn push_status(&self, response: AppResult<SummarizeTask>) {
        self.status_responses.lock().unwrap().push_back(response);
    }
}

#[async_trait]
impl WorkspaceApi for MockWorkspaceApi {
    async fn create_project(&self, create: CreateProject) -> AppResult<Project> {
        let p = Project {
            id: ProjectId::new(),
            name: create.name,
            description: create.description,
            owner_id: UserId::new(),
            shared_users: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.projects.lock().unwrap().push(p.clone());
        Ok(p)
    }

    async fn list_projects(&self) -> AppResult<Vec<Project>> {
        Ok(self.projects.lock().unwrap().clone())
    }

    async fn get_project(&self, id: ProjectId) -> AppResult<Project> {
        self.projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("project {id} not found")))
    }

    async fn update_project(&self, id: ProjectId, update: UpdateProject) -> AppResult<Project> {
        let mut projects = self.projects.lock().unwrap();
        let p = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(format!("project {id} not found")))?;
        p.name = update.name;
        p.description = update.description;
        p.updated_at = Utc::now();
        Ok(p.clone())
    }

    async fn delete_project(&self, id: ProjectId) -> AppResult<()> {
        let mut projects = self.projects.lock().unwrap();
        let before = projects.len();
        projects.retain(|p| p.id != id);
        if projects.len() == before {
            return Err(AppError::not_found(format!("project {id} not found")));
        }
        Ok(())
    }

    async fn create_folder(
        &self,
        project_id: ProjectId,
        create: CreateFolder,
    ) -> AppResult<Folder> {
        let f = Folder {
            id: FolderId::new(),
            name: create.name,
            project_id,
            parent_folder_id: create.parent_folder_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.folders.lock().unwrap().push(f.clone());
        Ok(f)
    }

    async fn list_folders(&self, _project_id: ProjectId) -> AppResult<Vec<Folder>> {
        self.list_folder_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.folders.lock().unwrap().clone())
    }

    async fn update_folder(
        &self,
        _project_id: ProjectId,
        folder_id: FolderId,
        update: UpdateFolder,
    ) -> AppResult<Folder> {
        self.update_folder_calls.fetch_add(1, Ordering::SeqCst);
        let mut folders = self.folders.lock().unwrap();
        let f = folders
            .iter_mut()
            .find(|f| f.id == folder_id)
            .ok_or_else(|| AppError::not_found(format!("folder {folder_id} not found")))?;
        f.name = update.name;
        f.parent_folder_id = update.parent_folder_id;
        f.updated_at = Utc::now();
        Ok(f.clone())
    }

    async fn delete_folder(&self, _project_id: ProjectId, folder_id: FolderId) -> AppResult<()> {
        self.folders.lock().unwrap().retain(|f| f.id != folder_id);
        Ok(())
    }

    async fn upload_document(
        &self,
        project_id: ProjectId,
        file_name: &str,
        _data: Bytes,
        folder_id: Option<FolderId>,
    ) -> AppResult<Document> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        let d = document(project_id, file_name, folder_id);
        self.documents.lock().unwrap().push(d.clone());
        Ok(d)
    }

    async fn list_documents(&self, _project_id: ProjectId) -> AppResult<Vec<Document>> {
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn delete_document(&self, _project_id: ProjectId, id: DocumentId) -> AppResult<()> {
        self.documents.lock().unwrap().retain(|d| d.id != id);
        Ok(())
    }

    async fn create_text(&self, create: CreateText) -> AppResult<UserText> {
        let t = UserText {
            id: TextId::new(),
            title: create.title,
            content: create.content,
            folder_id: create.folder_id,
            project_ids: create.project_ids,
            shared_users: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.texts.lock().unwrap().push(t.clone());
        Ok(t)
    }

    async fn update_text(&self, id: TextId, update: UpdateText) -> AppResult<UserText> {
        self.update_text_calls
            .lock()
            .unwrap()
            .push((id, update.clone()));
        if self.fail_update_text.load(Ordering::SeqCst) {
            return Err(AppError::network("connection reset"));
        }
        let mut texts = self.texts.lock().unwrap();
        let t = texts
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::not_found(format!("text {id} not found")))?;
        t.title = update.title;
        t.content = update.content;
        t.project_ids = update.project_ids;
        t.folder_id = update.folder_id;
        // Server-side normalization observable to the client.
        t.updated_at = Utc::now() + chrono::Duration::seconds(1);
        Ok(t.clone())
    }

    async fn list_texts(&self, _project_id: ProjectId) -> AppResult<Vec<UserText>> {
        Ok(self.texts.lock().unwrap().clone())
    }

    async fn delete_text(&self, id: TextId) -> AppResult<()> {
        self.texts.lock().unwrap().retain(|t| t.id != id);
        Ok(())
    }

    async fn ask(
        &self,
        _scope: AskScope,
        question: &str,
        context: &[ItemRef],
    ) -> AppResult<String> {
        self.ask_calls
            .lock()
            .unwrap()
            .push((question.to_string(), context.len()));
        Ok(format!("answer to: {question}"))
    }

    async fn start_summarize(
        &self,
        _project_id: ProjectId,
        _folder_id: Option<FolderId>,
    ) -> AppResult<TaskId> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(AppError::api("summarizer unavailable"));
        }
        Ok(TaskId::new())
    }

    async fn summarize_status(&self, task_id: TaskId) -> AppResult<SummarizeTask> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        match self.status_responses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(SummarizeTask {
                task_id,
                status: SummarizeStatus::Processing,
                result_url: None,
                error_message: None,
            }),
        }
    }

    async fn cancel_summarize(&self, _task_id: TaskId) -> AppResult<()> {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_cancel.load(Ordering::SeqCst) {
            return Err(AppError::network("connection reset"));
        }
        Ok(())
    }

    async fn share_project(&self, _project_id: ProjectId, email: &str) -> AppResult<SharedUser> {
        Ok(SharedUser {
            id: UserId::new(),
            email: email.to_string(),
            shared_at: Utc::now(),
        })
    }

    async fn unshare_project(&self, _project_id: ProjectId, _user_id: UserId) -> AppResult<()> {
        Ok(())
    }

    async fn project_shared_users(&self, _project_id: ProjectId) -> AppResult<Vec<SharedUser>> {
        Ok(Vec::new())
    }

    async fn share_text(&self, _text_id: TextId, email: &str) -> AppResult<SharedUser> {
        Ok(SharedUser {
            id: UserId::new(),
            email: email.to_string(),
            shared_at: Utc::now(),
        })
    }

    async fn unshare_text(&self, _text_id: TextId, _user_id: UserId) -> AppResult<()> {
        Ok(())
    }

    async fn transcribe_audio(
        &self,
        _clip: Bytes,
        _file_name: &str,
        _text_id: Option<TextId>,
    ) -> AppResult<String> {
        Ok("[transcript]".to_string())
    }
}

/// A session wired to a fresh mock with one seeded project.
pub async fn session_with(
    api: Arc<MockWorkspaceApi>,
    project: &Project,
) -> WorkspaceSession {
    let config = AppConfig::default();
    let mut session = WorkspaceSession::new(api, &config);
    session
        .open_project(project.id)
        .await
        .expect("project opens");
    session
}
