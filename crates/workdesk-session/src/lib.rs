//! # workdesk-session
//!
//! The client-side core of Workdesk: the in-memory tree of
//! folders/documents/texts, the navigation and selection state machines,
//! the debounced auto-save pipeline, the summarization task tracker, and
//! the upload validator, all owned by a single [`WorkspaceSession`] value
//! object.
//!
//! Persistence flows through the [`WorkspaceApi`] collaborator trait,
//! implemented over HTTP in `workdesk-api` and mocked in tests.

pub mod api;
pub mod autosave;
pub mod events;
pub mod navigation;
pub mod selection;
pub mod session;
pub mod tracker;
pub mod tree;
pub mod upload;

pub use api::{AskScope, WorkspaceApi};
pub use events::{SessionEvent, SummarizeOutcome};
pub use session::WorkspaceSession;
pub use tracker::TrackerState;
pub use upload::{UploadRejection, UploadValidator};
