//! Debounced auto-save pipeline.
//!
//! Every content-change event schedules a save; only the timer that
//! survives the full debounce delay without being superseded fires the
//! persist call. This bounds write amplification to at most one request
//! per delay of continuous editing, and exactly one request shortly after
//! editing stops.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use workdesk_core::config::autosave::AutosaveConfig;
use workdesk_core::types::{FolderId, ProjectId, TextId};
use workdesk_entity::{UpdateText, UserText};

use crate::api::WorkspaceApi;
use crate::events::SessionEvent;

/// The values persisted by a scheduled save.
///
/// Captured at schedule time from the text being edited, never re-read at
/// fire time: a user switching away before the timer fires still saves the
/// text they were editing.
#[derive(Debug, Clone)]
pub struct SavePayload {
    /// The text to persist.
    pub text_id: TextId,
    /// Title at schedule time.
    pub title: String,
    /// Content at schedule time.
    pub content: String,
    /// Folder placement at schedule time.
    pub folder_id: Option<FolderId>,
    /// Project memberships at schedule time.
    pub project_ids: Vec<ProjectId>,
}

impl SavePayload {
    /// Capture the current state of a text.
    pub fn capture(text: &UserText) -> Self {
        Self {
            text_id: text.id,
            title: text.title.clone(),
            content: text.content.clone(),
            folder_id: text.folder_id,
            project_ids: text.project_ids.clone(),
        }
    }

    fn into_update(self) -> (TextId, UpdateText) {
        (
            self.text_id,
            UpdateText {
                title: self.title,
                content: self.content,
                project_ids: self.project_ids,
                folder_id: self.folder_id,
            },
        )
    }
}

struct PendingSave {
    cancel: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

/// Debounces rapid edit events into a single persisted update per text.
pub struct AutosavePipeline {
    api: Arc<dyn WorkspaceApi>,
    events: mpsc::UnboundedSender<SessionEvent>,
    debounce: Duration,
    pending: Option<PendingSave>,
}

impl std::fmt::Debug for AutosavePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutosavePipeline")
            .field("debounce", &self.debounce)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

impl AutosavePipeline {
    /// Create an idle pipeline.
    pub fn new(
        api: Arc<dyn WorkspaceApi>,
        events: mpsc::UnboundedSender<SessionEvent>,
        config: &AutosaveConfig,
    ) -> Self {
        Self {
            api,
            events,
            debounce: Duration::from_millis(config.debounce_ms),
            pending: None,
        }
    }

    /// Schedule a save of the captured payload after the debounce delay.
    ///
    /// Supersedes any save still waiting out its delay. A save whose delay
    /// already elapsed runs to completion; cancellation only covers the
    /// pending window.
    pub fn schedule(&mut self, payload: SavePayload) {
        if let Some(previous) = self.pending.take() {
            let _ = previous.cancel.send(());
        }

        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        let delay = self.debounce;
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = &mut cancel_rx => return,
                _ = tokio::time::sleep(delay) => {}
            }

            let text_id = payload.text_id;
            let (id, update) = payload.into_update();
            match api.update_text(id, update).await {
                Ok(saved) => {
                    tracing::debug!(text = %text_id, "auto-save persisted");
                    let _ = events.send(SessionEvent::TextSaved(saved));
                }
                Err(err) => {
                    tracing::warn!(text = %text_id, error = %err, "auto-save failed; edits kept locally");
                    let _ = events.send(SessionEvent::AutosaveFailed {
                        text_id,
                        message: err.to_string(),
                    });
                }
            }
        });

        self.pending = Some(PendingSave {
            cancel: cancel_tx,
            handle,
        });
    }

    /// Whether a scheduled save has not finished yet.
    pub fn has_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| !p.handle.is_finished())
    }

    /// Abort any scheduled save. A disposed pipeline never fires; no timer
    /// outlives the session that owns it.
    pub fn dispose(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }
}

impl Drop for AutosavePipeline {
    fn drop(&mut self) {
        self.dispose();
    }
}
