//! # workdesk-entity
//!
//! Domain entity models for Workdesk: projects, folders, documents,
//! rich-text notes, the `WorkspaceItem` sum type, summarization tasks,
//! and sharing records. Entities here are plain serde models mirroring
//! the Workspace API's JSON payloads; derived in-memory shapes (the
//! content tree) live in `folder::tree`.

pub mod document;
pub mod folder;
pub mod item;
pub mod project;
pub mod share;
pub mod task;
pub mod text;

pub use document::Document;
pub use folder::{ContentNode, CreateFolder, Folder, UpdateFolder};
pub use item::{ItemKind, ItemRef, WorkspaceItem};
pub use project::{CreateProject, Project, UpdateProject};
pub use share::SharedUser;
pub use task::{SummarizeStatus, SummarizeTask};
pub use text::{CreateText, UpdateText, UserText};
