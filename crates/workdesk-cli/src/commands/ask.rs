//! Question-answering command.

use clap::Args;

use workdesk_core::error::AppError;
use workdesk_core::types::{FolderId, ProjectId};

/// Arguments for the ask command
#[derive(Debug, Args)]
pub struct AskArgs {
    /// Project ID
    pub project_id: ProjectId,
    /// The question to ask
    pub question: String,
    /// Scope to a folder instead of the whole project
    #[arg(short = 'd', long)]
    pub folder: Option<FolderId>,
}

/// Execute the ask command
pub async fn execute(args: &AskArgs, env: &str) -> Result<(), AppError> {
    let mut session = super::open_project_session(env, args.project_id).await?;
    if let Some(folder) = args.folder {
        session.enter_folder(folder)?;
    }

    let answer = session.ask_question(&args.question).await?;
    println!("{answer}");
    Ok(())
}
