//! Text note management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use workdesk_core::error::AppError;
use workdesk_core::types::{FolderId, ProjectId, TextId};

use crate::output::{self, OutputFormat};

/// Arguments for text commands
#[derive(Debug, Args)]
pub struct TextArgs {
    /// Text subcommand
    #[command(subcommand)]
    pub command: TextCommand,
}

/// Text subcommands
#[derive(Debug, Subcommand)]
pub enum TextCommand {
    /// List texts of a project
    List {
        /// Project ID
        project_id: ProjectId,
    },
    /// Create a new text
    Create {
        /// Project ID
        project_id: ProjectId,
        /// Title
        #[arg(short, long)]
        title: String,
        /// Initial content
        #[arg(short, long, default_value = "")]
        content: String,
        /// Target folder ID (omit for project root)
        #[arg(short = 'd', long)]
        folder: Option<FolderId>,
    },
    /// Delete a text (asks for confirmation)
    Delete {
        /// Project ID
        project_id: ProjectId,
        /// Text ID
        id: TextId,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Text display row
#[derive(Debug, Serialize, Tabled)]
struct TextRow {
    /// Text ID
    id: String,
    /// Title
    title: String,
    /// Content length
    chars: usize,
    /// Updated at
    updated_at: String,
}

/// Execute text commands
pub async fn execute(args: &TextArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        TextCommand::List { project_id } => {
            let session = super::open_project_session(env, *project_id).await?;
            let rows: Vec<TextRow> = session
                .texts()
                .iter()
                .map(|t| TextRow {
                    id: t.id.to_string(),
                    title: t.title.clone(),
                    chars: t.content.chars().count(),
                    updated_at: t.updated_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        TextCommand::Create {
            project_id,
            title,
            content,
            folder,
        } => {
            let mut session = super::open_project_session(env, *project_id).await?;
            if let Some(folder) = folder {
                session.enter_folder(*folder)?;
            }
            let text = session.create_text(title, content).await?;
            output::print_success(&format!("Created text '{}' ({})", text.title, text.id));
        }
        TextCommand::Delete { project_id, id, yes } => {
            let mut session = super::open_project_session(env, *project_id).await?;
            if !yes {
                let confirmed = dialoguer::Confirm::new()
                    .with_prompt(format!("Delete text {id}?"))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("prompt failed: {e}")))?;
                if !confirmed {
                    output::print_warning("Aborted.");
                    return Ok(());
                }
            }
            session.delete_text(*id).await?;
            output::print_success(&format!("Deleted text {id}"));
        }
    }
    Ok(())
}
