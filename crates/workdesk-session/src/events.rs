//! Session events emitted by the background timers.
//!
//! The auto-save pipeline and the summarize tracker run on spawned tasks
//! and communicate back to the session exclusively through these events;
//! the UI layer renders them, the session applies their state effects in
//! [`crate::session::WorkspaceSession::next_event`].

use workdesk_core::types::{TaskId, TextId};
use workdesk_entity::UserText;

/// Terminal outcome of a summarization job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizeOutcome {
    /// The summary is ready; a new document has been produced server-side.
    Completed {
        /// Where the result can be fetched.
        result_url: Option<String>,
    },
    /// The job failed, either server-side or on transport.
    Errored {
        /// Human-readable failure message.
        message: String,
    },
    /// The user stopped watching the job.
    Cancelled,
}

/// An event produced by a session-owned background task.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A debounced save succeeded; carries the server's canonical record.
    TextSaved(UserText),
    /// A debounced save failed; local edits are retained and the next
    /// scheduled save retries.
    AutosaveFailed {
        /// The text whose save failed.
        text_id: TextId,
        /// Classified error message.
        message: String,
    },
    /// A summarization poll tick observed the job still processing.
    SummarizeProgress {
        /// The tracked task.
        task_id: TaskId,
        /// Human-readable status line.
        message: String,
    },
    /// A summarization job reached a terminal state.
    SummarizeFinished {
        /// The tracked task.
        task_id: TaskId,
        /// How it ended.
        outcome: SummarizeOutcome,
    },
}
