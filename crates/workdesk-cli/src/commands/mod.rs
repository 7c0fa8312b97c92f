//! CLI command definitions and dispatch.

pub mod ask;
pub mod project;
pub mod summarize;
pub mod text;
pub mod tree;
pub mod upload;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use workdesk_api::WorkspaceClient;
use workdesk_core::config::AppConfig;
use workdesk_core::error::AppError;
use workdesk_core::types::ProjectId;
use workdesk_session::WorkspaceSession;

use crate::output::OutputFormat;

/// Workdesk document/workspace assistant client
#[derive(Debug, Parser)]
#[command(name = "workdesk", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (merged over config/default.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Project management
    Project(project::ProjectArgs),
    /// Show a project's content tree
    Tree(tree::TreeArgs),
    /// Upload a document
    Upload(upload::UploadArgs),
    /// Text note management
    Text(text::TextArgs),
    /// Ask a question against a project or folder
    Ask(ask::AskArgs),
    /// Run a summarization job and watch it
    Summarize(summarize::SummarizeArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Project(args) => project::execute(args, &self.env, self.format).await,
            Commands::Tree(args) => tree::execute(args, &self.env).await,
            Commands::Upload(args) => upload::execute(args, &self.env).await,
            Commands::Text(args) => text::execute(args, &self.env, self.format).await,
            Commands::Ask(args) => ask::execute(args, &self.env).await,
            Commands::Summarize(args) => summarize::execute(args, &self.env).await,
        }
    }
}

/// Helper: load configuration for an environment
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}

/// Helper: build a workspace session from config
pub fn build_session(config: &AppConfig) -> Result<WorkspaceSession, AppError> {
    let client = WorkspaceClient::from_config(&config.api)?;
    Ok(WorkspaceSession::new(Arc::new(client), config))
}

/// Helper: build a session with a project opened
pub async fn open_project_session(
    env: &str,
    project_id: ProjectId,
) -> Result<WorkspaceSession, AppError> {
    let config = load_config(env)?;
    let mut session = build_session(&config)?;
    session.open_project(project_id).await?;
    Ok(session)
}
