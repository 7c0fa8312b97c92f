//! The reqwest-backed Workspace API client.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{multipart, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use workdesk_core::config::api::ApiConfig;
use workdesk_core::error::ErrorKind;
use workdesk_core::types::{DocumentId, FolderId, ProjectId, TaskId, TextId, UserId};
use workdesk_core::{AppError, AppResult};
use workdesk_entity::{
    CreateFolder, CreateProject, CreateText, Document, Folder, ItemRef, Project, SharedUser,
    SummarizeTask, UpdateFolder, UpdateProject, UpdateText, UserText,
};
use workdesk_session::api::{AskScope, WorkspaceApi};

use crate::wire::{
    AskRequest, AskResponse, ErrorBody, ShareRequest, StartSummarizeRequest,
    StartSummarizeResponse, TranscriptionResponse,
};

/// Bearer-token-authenticated HTTP client for the Workspace API.
#[derive(Debug, Clone)]
pub struct WorkspaceClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl WorkspaceClient {
    /// Build a client from configuration. The bearer token is read from the
    /// environment variable named in `config.token_env`, when present.
    pub fn from_config(config: &ApiConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: std::env::var(&config.token_env).ok(),
        })
    }

    /// Replace the bearer token (e.g. after a fresh login).
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let response = self
            .request(method, path)
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        handle(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self
            .request(Method::GET, path)
            .send()
            .await
            .map_err(transport)?;
        handle(response).await
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let response = self
            .request(Method::DELETE, path)
            .send()
            .await
            .map_err(transport)?;
        handle_empty(response).await
    }
}

/// Map a transport failure into the unified taxonomy.
fn transport(err: reqwest::Error) -> AppError {
    AppError::with_source(ErrorKind::Network, format!("transport error: {err}"), err)
}

/// Classify a non-success HTTP status.
///
/// 401 is always "session expired" regardless of the body: the caller
/// discards in-memory session state and redirects to login.
fn classify(status: StatusCode, detail: String) -> AppError {
    match status.as_u16() {
        401 => AppError::authentication("session expired"),
        403 => AppError::authorization(detail),
        404 => AppError::not_found(detail),
        409 => AppError::conflict(detail),
        400 | 422 => AppError::validation(detail),
        _ => AppError::api(detail),
    }
}

/// Extract the server's `{"detail": ...}` message, falling back to the raw
/// body, then to the status line.
async fn error_detail(response: reqwest::Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) if !body.is_empty() => serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.detail)
            .unwrap_or(body),
        _ => format!("request failed with status {status}"),
    }
}

async fn handle<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("malformed response body: {e}"),
                e,
            )
        });
    }
    let err = classify(status, error_detail(response).await);
    tracing::debug!(%status, error = %err, "workspace API call failed");
    Err(err)
}

async fn handle_empty(response: reqwest::Response) -> AppResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    Err(classify(status, error_detail(response).await))
}

#[async_trait]
impl WorkspaceApi for WorkspaceClient {
    // Projects

    async fn create_project(&self, create: CreateProject) -> AppResult<Project> {
        self.send_json(Method::POST, "/projects", &create).await
    }

    async fn list_projects(&self) -> AppResult<Vec<Project>> {
        self.get_json("/projects").await
    }

    async fn get_project(&self, id: ProjectId) -> AppResult<Project> {
        self.get_json(&format!("/projects/{id}")).await
    }

    async fn update_project(&self, id: ProjectId, update: UpdateProject) -> AppResult<Project> {
        self.send_json(Method::PUT, &format!("/projects/{id}"), &update)
            .await
    }

    async fn delete_project(&self, id: ProjectId) -> AppResult<()> {
        self.delete(&format!("/projects/{id}")).await
    }

    // Folders

    async fn create_folder(
        &self,
        project_id: ProjectId,
        create: CreateFolder,
    ) -> AppResult<Folder> {
        self.send_json(Method::POST, &format!("/projects/{project_id}/folders"), &create)
            .await
    }

    async fn list_folders(&self, project_id: ProjectId) -> AppResult<Vec<Folder>> {
        self.get_json(&format!("/projects/{project_id}/folders"))
            .await
    }

    async fn update_folder(
        &self,
        project_id: ProjectId,
        folder_id: FolderId,
        update: UpdateFolder,
    ) -> AppResult<Folder> {
        self.send_json(
            Method::PUT,
            &format!("/projects/{project_id}/folders/{folder_id}"),
            &update,
        )
        .await
    }

    async fn delete_folder(&self, project_id: ProjectId, folder_id: FolderId) -> AppResult<()> {
        self.delete(&format!("/projects/{project_id}/folders/{folder_id}"))
            .await
    }

    // Documents

    async fn upload_document(
        &self,
        project_id: ProjectId,
        file_name: &str,
        data: Bytes,
        folder_id: Option<FolderId>,
    ) -> AppResult<Document> {
        let part = multipart::Part::bytes(data.to_vec()).file_name(file_name.to_string());
        let mut form = multipart::Form::new().part("file", part);
        if let Some(folder_id) = folder_id {
            form = form.text("folder_id", folder_id.to_string());
        }
        let response = self
            .request(Method::POST, &format!("/projects/{project_id}/documents"))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        handle(response).await
    }

    async fn list_documents(&self, project_id: ProjectId) -> AppResult<Vec<Document>> {
        self.get_json(&format!("/projects/{project_id}/documents"))
            .await
    }

    async fn delete_document(&self, project_id: ProjectId, id: DocumentId) -> AppResult<()> {
        self.delete(&format!("/projects/{project_id}/documents/{id}"))
            .await
    }

    // Texts

    async fn create_text(&self, create: CreateText) -> AppResult<UserText> {
        self.send_json(Method::POST, "/texts", &create).await
    }

    async fn update_text(&self, id: TextId, update: UpdateText) -> AppResult<UserText> {
        self.send_json(Method::PUT, &format!("/texts/{id}"), &update)
            .await
    }

    async fn list_texts(&self, project_id: ProjectId) -> AppResult<Vec<UserText>> {
        self.get_json(&format!("/texts?project_id={project_id}"))
            .await
    }

    async fn delete_text(&self, id: TextId) -> AppResult<()> {
        self.delete(&format!("/texts/{id}")).await
    }

    // Question answering

    async fn ask(
        &self,
        scope: AskScope,
        question: &str,
        context: &[ItemRef],
    ) -> AppResult<String> {
        let (project_id, folder_id) = match scope {
            AskScope::Project(id) => (Some(id), None),
            AskScope::Folder(id) => (None, Some(id)),
        };
        let body = AskRequest {
            project_id,
            folder_id,
            question,
            context_items: context,
        };
        let response: AskResponse = self.send_json(Method::POST, "/ask", &body).await?;
        Ok(response.answer)
    }

    // Summarization

    async fn start_summarize(
        &self,
        project_id: ProjectId,
        folder_id: Option<FolderId>,
    ) -> AppResult<TaskId> {
        let body = StartSummarizeRequest {
            project_id,
            folder_id,
        };
        let response: StartSummarizeResponse =
            self.send_json(Method::POST, "/summarize", &body).await?;
        Ok(response.task_id)
    }

    async fn summarize_status(&self, task_id: TaskId) -> AppResult<SummarizeTask> {
        self.get_json(&format!("/summarize/{task_id}")).await
    }

    async fn cancel_summarize(&self, task_id: TaskId) -> AppResult<()> {
        let response = self
            .request(Method::POST, &format!("/summarize/{task_id}/cancel"))
            .send()
            .await
            .map_err(transport)?;
        handle_empty(response).await
    }

    // Sharing

    async fn share_project(&self, project_id: ProjectId, email: &str) -> AppResult<SharedUser> {
        self.send_json(
            Method::POST,
            &format!("/projects/{project_id}/share"),
            &ShareRequest { email },
        )
        .await
    }

    async fn unshare_project(&self, project_id: ProjectId, user_id: UserId) -> AppResult<()> {
        self.delete(&format!("/projects/{project_id}/share/{user_id}"))
            .await
    }

    async fn project_shared_users(&self, project_id: ProjectId) -> AppResult<Vec<SharedUser>> {
        self.get_json(&format!("/projects/{project_id}/shared-users"))
            .await
    }

    async fn share_text(&self, text_id: TextId, email: &str) -> AppResult<SharedUser> {
        self.send_json(
            Method::POST,
            &format!("/texts/{text_id}/share"),
            &ShareRequest { email },
        )
        .await
    }

    async fn unshare_text(&self, text_id: TextId, user_id: UserId) -> AppResult<()> {
        self.delete(&format!("/texts/{text_id}/share/{user_id}"))
            .await
    }

    // Audio transcription

    async fn transcribe_audio(
        &self,
        clip: Bytes,
        file_name: &str,
        text_id: Option<TextId>,
    ) -> AppResult<String> {
        let part = multipart::Part::bytes(clip.to_vec()).file_name(file_name.to_string());
        let mut form = multipart::Form::new().part("file", part);
        if let Some(text_id) = text_id {
            form = form.text("text_id", text_id.to_string());
        }
        let response = self
            .request(Method::POST, "/transcriptions")
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        let body: TranscriptionResponse = handle(response).await?;
        Ok(body.text)
    }
}
