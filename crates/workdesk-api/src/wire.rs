//! Wire-only request/response shapes.
//!
//! Entities deserialize directly from their API payloads; the DTOs here
//! cover the endpoints whose bodies do not map one-to-one onto an entity.

use serde::{Deserialize, Serialize};

use workdesk_core::types::{FolderId, ProjectId, TaskId};
use workdesk_entity::ItemRef;

/// Error body shape: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Body for `POST /ask`.
#[derive(Debug, Serialize)]
pub struct AskRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<FolderId>,
    pub question: &'a str,
    pub context_items: &'a [ItemRef],
}

/// Response from `POST /ask`.
#[derive(Debug, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Body for `POST /summarize`.
#[derive(Debug, Serialize)]
pub struct StartSummarizeRequest {
    pub project_id: ProjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<FolderId>,
}

/// Response from `POST /summarize`.
#[derive(Debug, Deserialize)]
pub struct StartSummarizeResponse {
    pub task_id: TaskId,
}

/// Body for share endpoints.
#[derive(Debug, Serialize)]
pub struct ShareRequest<'a> {
    pub email: &'a str,
}

/// Response from `POST /transcriptions`.
#[derive(Debug, Deserialize)]
pub struct TranscriptionResponse {
    pub text: String,
}
