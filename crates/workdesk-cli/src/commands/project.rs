//! Project management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use workdesk_core::error::AppError;
use workdesk_core::types::{ProjectId, UserId};

use crate::output::{self, OutputFormat};

/// Arguments for project commands
#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Project subcommand
    #[command(subcommand)]
    pub command: ProjectCommand,
}

/// Project subcommands
#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// List projects
    List,
    /// Create a new project
    Create {
        /// Project name
        #[arg(short, long)]
        name: String,
        /// Project description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Show one project
    Show {
        /// Project ID
        id: ProjectId,
    },
    /// Delete a project (asks for confirmation)
    Delete {
        /// Project ID
        id: ProjectId,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Share a project with a user by email
    Share {
        /// Project ID
        id: ProjectId,
        /// Email to share with
        email: String,
    },
    /// Revoke a user's access
    Unshare {
        /// Project ID
        id: ProjectId,
        /// User ID to remove
        user_id: UserId,
    },
    /// List users a project is shared with
    SharedUsers {
        /// Project ID
        id: ProjectId,
    },
}

/// Project display row
#[derive(Debug, Serialize, Tabled)]
struct ProjectRow {
    /// Project ID
    id: String,
    /// Name
    name: String,
    /// Description
    description: String,
    /// Shared with
    shared: usize,
    /// Created at
    created_at: String,
}

/// Execute project commands
pub async fn execute(args: &ProjectArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let mut session = super::build_session(&config)?;

    match &args.command {
        ProjectCommand::List => {
            let projects = session.list_projects().await?;
            let rows: Vec<ProjectRow> = projects
                .iter()
                .map(|p| ProjectRow {
                    id: p.id.to_string(),
                    name: p.name.clone(),
                    description: p.description.clone(),
                    shared: p.shared_users.len(),
                    created_at: p.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        ProjectCommand::Create { name, description } => {
            let project = session.create_project(name, description).await?;
            output::print_success(&format!("Created project '{}' ({})", project.name, project.id));
        }
        ProjectCommand::Show { id } => {
            session.open_project(*id).await?;
            let project = session.project().expect("project just opened");
            output::print_kv("id", &project.id.to_string());
            output::print_kv("name", &project.name);
            output::print_kv("description", &project.description);
            output::print_kv("folders", &session.folders().len().to_string());
            output::print_kv("documents", &session.documents().len().to_string());
            output::print_kv("texts", &session.texts().len().to_string());
        }
        ProjectCommand::Delete { id, yes } => {
            if !yes {
                let confirmed = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Delete project {id} and everything in it? This cannot be undone."
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("prompt failed: {e}")))?;
                if !confirmed {
                    output::print_warning("Aborted.");
                    return Ok(());
                }
            }
            session.delete_project(*id).await?;
            output::print_success(&format!("Deleted project {id}"));
        }
        ProjectCommand::Share { id, email } => {
            session.open_project(*id).await?;
            let shared = session.share_project(email).await?;
            output::print_success(&format!("Shared with {} ({})", shared.email, shared.id));
        }
        ProjectCommand::Unshare { id, user_id } => {
            session.open_project(*id).await?;
            session.unshare_project(*user_id).await?;
            output::print_success(&format!("Removed access for {user_id}"));
        }
        ProjectCommand::SharedUsers { id } => {
            session.open_project(*id).await?;
            let users = session.shared_users().await?;
            for user in users {
                output::print_kv(&user.email, &user.shared_at.format("%Y-%m-%d").to_string());
            }
        }
    }

    Ok(())
}
