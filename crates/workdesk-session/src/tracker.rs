//! Asynchronous summarization task tracker.
//!
//! Drives the create → poll → complete/cancel lifecycle of a server-side
//! summarization job. The polling loop is the single source of truth for
//! "a job is in flight": at most one task is tracked per session, and the
//! loop's handle is aborted on cancel and dispose so no timer outlives the
//! session.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use workdesk_core::config::summarize::SummarizeConfig;
use workdesk_core::types::{FolderId, ProjectId, TaskId};
use workdesk_core::{AppError, AppResult};
use workdesk_entity::SummarizeStatus;

use crate::api::WorkspaceApi;
use crate::events::{SessionEvent, SummarizeOutcome};

/// Tracker lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// No task has been started.
    Idle,
    /// The create request is in flight.
    Starting,
    /// The polling loop is running.
    Polling,
    /// The job finished and produced a result.
    Completed,
    /// The job failed (server-side or on transport).
    Errored,
    /// The user stopped watching the job.
    Cancelled,
}

impl TrackerState {
    /// Whether a task is being started or watched right now.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Starting | Self::Polling)
    }
}

struct ActiveTask {
    task_id: TaskId,
    handle: JoinHandle<()>,
}

/// Tracks at most one summarization job per workspace session.
pub struct SummarizeTracker {
    api: Arc<dyn WorkspaceApi>,
    events: mpsc::UnboundedSender<SessionEvent>,
    poll_interval: Duration,
    state: Arc<Mutex<TrackerState>>,
    active: Option<ActiveTask>,
}

impl std::fmt::Debug for SummarizeTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummarizeTracker")
            .field("state", &self.state())
            .finish()
    }
}

impl SummarizeTracker {
    /// Create an idle tracker.
    pub fn new(
        api: Arc<dyn WorkspaceApi>,
        events: mpsc::UnboundedSender<SessionEvent>,
        config: &SummarizeConfig,
    ) -> Self {
        Self {
            api,
            events,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            state: Arc::new(Mutex::new(TrackerState::Idle)),
            active: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TrackerState {
        *self.state.lock().expect("tracker state lock poisoned")
    }

    /// Whether a task is being started or watched.
    pub fn is_active(&self) -> bool {
        self.state().is_active()
    }

    /// The task currently (or last) tracked.
    pub fn task_id(&self) -> Option<TaskId> {
        self.active.as_ref().map(|a| a.task_id)
    }

    fn set_state(&self, state: TrackerState) {
        *self.state.lock().expect("tracker state lock poisoned") = state;
    }

    /// Start a summarization job and begin polling it.
    ///
    /// Rejected with a conflict while another task is active: a double
    /// start must never produce two concurrent polling loops.
    pub async fn start(
        &mut self,
        project_id: ProjectId,
        folder_id: Option<FolderId>,
    ) -> AppResult<TaskId> {
        if self.is_active() {
            return Err(AppError::conflict(
                "a summarization task is already running",
            ));
        }

        self.set_state(TrackerState::Starting);
        let task_id = match self.api.start_summarize(project_id, folder_id).await {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(error = %err, "failed to start summarization");
                self.set_state(TrackerState::Errored);
                return Err(err);
            }
        };

        tracing::info!(task = %task_id, "summarization started");
        self.set_state(TrackerState::Polling);

        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        let state = Arc::clone(&self.state);
        let poll_interval = self.poll_interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of an interval completes immediately; the
            // first status request happens one full interval after start.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                match api.summarize_status(task_id).await {
                    Err(err) => {
                        tracing::warn!(task = %task_id, error = %err, "status poll failed");
                        *state.lock().expect("tracker state lock poisoned") =
                            TrackerState::Errored;
                        let _ = events.send(SessionEvent::SummarizeFinished {
                            task_id,
                            outcome: SummarizeOutcome::Errored {
                                message: err.to_string(),
                            },
                        });
                        return;
                    }
                    Ok(task) if task.is_finished() => {
                        let (terminal, outcome) = match task.status {
                            SummarizeStatus::Error => (
                                TrackerState::Errored,
                                SummarizeOutcome::Errored {
                                    message: task
                                        .error_message
                                        .unwrap_or_else(|| "summarization failed".to_string()),
                                },
                            ),
                            SummarizeStatus::Cancelled => {
                                (TrackerState::Cancelled, SummarizeOutcome::Cancelled)
                            }
                            // Completed, or a result reference arrived
                            // before the status caught up.
                            _ => (
                                TrackerState::Completed,
                                SummarizeOutcome::Completed {
                                    result_url: task.result_url,
                                },
                            ),
                        };
                        tracing::info!(task = %task_id, state = ?terminal, "summarization finished");
                        *state.lock().expect("tracker state lock poisoned") = terminal;
                        let _ = events.send(SessionEvent::SummarizeFinished { task_id, outcome });
                        return;
                    }
                    Ok(task) => {
                        let _ = events.send(SessionEvent::SummarizeProgress {
                            task_id,
                            message: format!("Summarization {}...", task.status),
                        });
                    }
                }
            }
        });

        self.active = Some(ActiveTask { task_id, handle });
        Ok(task_id)
    }

    /// Stop watching the current task.
    ///
    /// Idempotent. The local timer stops and the state becomes `Cancelled`
    /// unconditionally; the remote cancel request is best-effort and its
    /// failure never leaves the tracker stuck in `Polling`.
    pub fn cancel(&mut self) {
        if !self.is_active() {
            return;
        }
        let Some(active) = self.active.take() else {
            return;
        };

        active.handle.abort();
        self.set_state(TrackerState::Cancelled);
        let _ = self.events.send(SessionEvent::SummarizeFinished {
            task_id: active.task_id,
            outcome: SummarizeOutcome::Cancelled,
        });

        let api = Arc::clone(&self.api);
        let task_id = active.task_id;
        tokio::spawn(async move {
            if let Err(err) = api.cancel_summarize(task_id).await {
                tracing::warn!(task = %task_id, error = %err, "remote cancel failed; local tracker already stopped");
            }
        });
    }

    /// Abort the polling loop without emitting events and return to
    /// `Idle`. Part of session disposal and project switching.
    pub fn dispose(&mut self) {
        if let Some(active) = self.active.take() {
            active.handle.abort();
        }
        self.set_state(TrackerState::Idle);
    }
}

impl Drop for SummarizeTracker {
    fn drop(&mut self) {
        self.dispose();
    }
}
