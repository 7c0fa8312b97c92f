//! Summarization task entity and status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

use workdesk_core::types::TaskId;

/// Status of a server-side summarization job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarizeStatus {
    /// The server is still working on the summary.
    Processing,
    /// The summary is ready.
    Completed,
    /// The server reported a failure.
    Error,
    /// The job was cancelled.
    Cancelled,
}

impl SummarizeStatus {
    /// Check if the status is terminal (no further automatic transition).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error | Self::Cancelled)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Error => "error",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SummarizeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tracked summarization job as reported by the Workspace API.
///
/// Created by a start request, polled until terminal, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeTask {
    /// Server-assigned task identifier.
    pub task_id: TaskId,
    /// Current job status.
    pub status: SummarizeStatus,
    /// Where to fetch the result once completed.
    #[serde(default)]
    pub result_url: Option<String>,
    /// Server error message when status is `Error`.
    #[serde(default)]
    pub error_message: Option<String>,
}

impl SummarizeTask {
    /// Whether this poll response concludes the job.
    ///
    /// A present `result_url` concludes it even if the reported status has
    /// not caught up yet.
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal() || self.result_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(!SummarizeStatus::Processing.is_terminal());
        assert!(SummarizeStatus::Completed.is_terminal());
        assert!(SummarizeStatus::Error.is_terminal());
        assert!(SummarizeStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_result_url_finishes_processing_task() {
        let task = SummarizeTask {
            task_id: TaskId::new(),
            status: SummarizeStatus::Processing,
            result_url: Some("/results/1".to_string()),
            error_message: None,
        };
        assert!(task.is_finished());
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&SummarizeStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
    }
}
