//! Core type definitions used across the Workdesk workspace.

pub mod id;

pub use id::*;
