//! Document upload command.

use std::path::PathBuf;

use bytes::Bytes;
use clap::Args;

use workdesk_core::error::AppError;
use workdesk_core::types::{FolderId, ProjectId};

use crate::output;

/// Arguments for the upload command
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Project ID
    pub project_id: ProjectId,
    /// File to upload
    pub file: PathBuf,
    /// Target folder ID (omit for project root)
    #[arg(short = 'd', long)]
    pub folder: Option<FolderId>,
}

/// Execute the upload command
pub async fn execute(args: &UploadArgs, env: &str) -> Result<(), AppError> {
    let mut session = super::open_project_session(env, args.project_id).await?;
    if let Some(folder) = args.folder {
        session.enter_folder(folder)?;
    }

    let file_name = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AppError::validation("file path has no usable file name"))?
        .to_string();
    let data = tokio::fs::read(&args.file).await?;

    let document = session.upload_document(&file_name, Bytes::from(data)).await?;
    output::print_success(&format!("Uploaded {} ({})", document.name, document.id));
    Ok(())
}
