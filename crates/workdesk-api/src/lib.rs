//! # workdesk-api
//!
//! The HTTP implementation of the `WorkspaceApi` collaborator: a
//! bearer-token-authenticated reqwest client speaking JSON (and multipart
//! for uploads) to the Workspace API, with HTTP statuses classified into
//! the unified error taxonomy.

pub mod client;
mod wire;

pub use client::WorkspaceClient;
